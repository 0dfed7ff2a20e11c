//! Event handling and state transition logic.
//!
//! Every input the selection screen reacts to (keys already mapped by the
//! plugin shim, HTTP responses, timers, configuration) arrives as an
//! [`Event`]. [`handle_event`] mutates [`AppState`] and returns whether a
//! re-render is needed plus the side effects to perform.
//!
//! # Event Types
//!
//! - **Navigation**: `CursorDown`, `CursorUp`
//! - **Selection**: `ActivateCard`, `Select`, `Unselect`, `CloseTimerFired`, `Continue`
//! - **Filters**: `SearchMode`, `FinishSearch`, `ExitSearch`, `SearchChanged`,
//!   `AllowedOnRoadChanged`, `HeavyWasteChanged`
//! - **Data**: `EndpointChanged`, `OfferingsResponse`, `NetworkUnavailable`, `Retry`
//! - **Lifecycle**: `Teardown`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use skiphire::app::{handle_event, AppState, Event, ScreenSettings};
//! use skiphire::ui::Theme;
//!
//! let mut state = AppState::new(ScreenSettings::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Select(2))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), skiphire::SkipHireError>(())
//! ```

use super::actions::{Action, Handoff};
use super::card::{primary_action, CardAction};
use super::modes::InputMode;
use super::selection::CloseToken;
use super::state::AppState;
use crate::domain::error::{Result, SkipHireError};
use crate::fetch::parse_response;

/// Events triggered by user input, the network or timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor down by one card (wraps to top).
    CursorDown,
    /// Moves the cursor up by one card (wraps to bottom).
    CursorUp,

    /// Primary action of the card under the cursor: select or unselect.
    ActivateCard,
    /// Selects the offering with this id. Ids missing from the active list
    /// are ignored.
    Select(u64),
    /// Starts closing the current selection.
    Unselect,
    /// The closing delay scheduled with this token elapsed.
    CloseTimerFired(CloseToken),
    /// Hands the selected offering to the next checkout stage.
    Continue,

    /// Gives the search box keyboard focus.
    SearchMode,
    /// Leaves the search box, keeping the query.
    FinishSearch,
    /// Leaves the search box and clears the query.
    ExitSearch,
    /// New full text of the search box.
    SearchChanged(String),
    /// New value of the "allowed on road" checkbox.
    AllowedOnRoadChanged(bool),
    /// New value of the "allows heavy waste" checkbox.
    HeavyWasteChanged(bool),

    /// The pricing endpoint became available or changed.
    ///
    /// Sent once network access is granted with the configured endpoint.
    EndpointChanged(Option<String>),

    /// Raw outcome of an offerings request.
    OfferingsResponse {
        request_id: u64,
        status: u16,
        /// Zellij reports transport failures as a response without headers.
        has_headers: bool,
        body: Vec<u8>,
    },

    /// Network access to the endpoint is unavailable, with the reason.
    ///
    /// Shown as a fetch error; `Retry` then asks for access again.
    NetworkUnavailable(String),

    /// Re-issues the offerings request after a failure.
    Retry,

    /// The screen is going away: drops the selection and pending closes.
    /// Every later event is ignored.
    Teardown,

    /// Tears the screen down and closes the pane.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed in order by the plugin
/// runtime.
///
/// # Errors
///
/// Currently infallible in practice; request failures are recorded in the
/// fetch state rather than returned.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if state.torn_down {
        tracing::trace!("screen torn down, ignoring event");
        return Ok((false, vec![]));
    }

    match event {
        Event::CursorDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::ActivateCard => {
            let Some(offering) = state.cursor_offering() else {
                tracing::debug!("no card under cursor");
                return Ok((false, vec![]));
            };
            let action = primary_action(offering.id, state.selection.is_selected(offering.id));
            match action {
                CardAction::Select(id) => handle_event(state, &Event::Select(id)),
                CardAction::Unselect => handle_event(state, &Event::Unselect),
            }
        }
        Event::Select(id) => {
            if state.selection.is_selected(*id) {
                return Ok((false, vec![]));
            }
            if !state.active_offerings().iter().any(|o| o.id == *id) {
                tracing::debug!(offering_id = id, "ignoring selection of unknown offering");
                return Ok((false, vec![]));
            }
            tracing::debug!(offering_id = id, "offering selected");
            state.selection.select(*id);
            Ok((true, vec![]))
        }
        Event::Unselect => {
            let active = state.active_offerings().to_vec();
            let Some(token) = state.selection.unselect(&active) else {
                return Ok((true, vec![]));
            };
            tracing::debug!(token = token.0, delay_ms = state.closing_delay.as_millis(), "selection closing");
            Ok((
                true,
                vec![Action::ScheduleClose {
                    token,
                    delay: state.closing_delay,
                }],
            ))
        }
        Event::CloseTimerFired(token) => Ok((state.selection.close_timer_fired(*token), vec![])),
        Event::Continue => {
            let Some(offering) = state.selected_offering() else {
                tracing::debug!("continue without selection ignored");
                return Ok((false, vec![]));
            };
            if offering.forbidden {
                tracing::warn!(offering_id = offering.id, "continuing with a forbidden offering");
            }
            Ok((false, vec![Action::Continue(Handoff::from_offering(offering))]))
        }
        Event::SearchMode => {
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::FinishSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.filters.search, "clearing search");
            state.input_mode = InputMode::Normal;
            state.filters.search.clear();
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::SearchChanged(text) => {
            if state.filters.search == *text {
                return Ok((false, vec![]));
            }
            state.filters.search.clone_from(text);
            tracing::trace!(query = %text, "search query updated");
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::AllowedOnRoadChanged(required) => {
            state.filters.allowed_on_road_required = *required;
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::HeavyWasteChanged(required) => {
            state.filters.heavy_waste_required = *required;
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::EndpointChanged(endpoint) => {
            let endpoint = endpoint.clone().filter(|e| !e.trim().is_empty());
            state.endpoint.clone_from(&endpoint);
            let request = state.fetch.configure(endpoint);
            state.reconcile_selection();
            state.apply_filters();
            Ok((true, request.map(Action::FetchOfferings).into_iter().collect()))
        }
        Event::OfferingsResponse {
            request_id,
            status,
            has_headers,
            body,
        } => {
            let outcome = if *has_headers {
                parse_response(*status, body)
            } else {
                Err(SkipHireError::Transport(
                    String::from_utf8_lossy(body).trim().to_string(),
                ))
            };
            if !state.fetch.settle(*request_id, outcome) {
                return Ok((false, vec![]));
            }
            state.reconcile_selection();
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::NetworkUnavailable(reason) => {
            if !state.is_live() {
                tracing::debug!("no endpoint configured, fallback data unaffected");
                return Ok((false, vec![]));
            }
            state.fetch.mark_unavailable(reason);
            Ok((true, vec![]))
        }
        Event::Retry => {
            if let Some(request) = state.fetch.retry() {
                return Ok((true, vec![Action::FetchOfferings(request)]));
            }
            if state.is_live() && state.fetch.endpoint().is_none() && state.fetch.error().is_some() {
                tracing::debug!("asking for network access again");
                return Ok((false, vec![Action::RequestNetworkAccess]));
            }
            Ok((false, vec![]))
        }
        Event::Teardown => {
            tracing::debug!("tearing down selection screen");
            state.torn_down = true;
            state.selection.clear();
            Ok((false, vec![]))
        }
        Event::CloseFocus => {
            let (_, mut actions) = handle_event(state, &Event::Teardown)?;
            actions.push(Action::CloseFocus);
            Ok((false, actions))
        }
    }
}
