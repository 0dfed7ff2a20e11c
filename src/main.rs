//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the skiphire library and the Zellij plugin
//! system. It owns everything that talks to the host: permissions, event
//! subscriptions, web requests, timers, pipe messages and pane visibility.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 3. **Permission granted**: Hand the configured endpoint to the app, which
//!    answers with the offerings request. A denial is shown as a fetch error
//!    and `R` prompts again
//! 4. **Update**: Translate host events, delegate to `handle_event`, execute actions
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key(..)` → navigation, selection, filter and lifecycle events
//! - `WebRequestResult` → `Event::OfferingsResponse` (matched by request id)
//! - `Timer` → `Event::CloseTimerFired` with the oldest pending close token
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//!
//! In normal mode:
//! - `j` / `k`: Move down / up
//! - `Enter` / `Space`: Select or unselect the card under the cursor
//! - `/`: Type into the search box
//! - `r`: Toggle "allowed on road"
//! - `w`: Toggle "allows heavy waste"
//! - `c`: Continue with the selected skip
//! - `R` (shift): Retry after a failed request
//! - `Esc`: Clear the search
//! - `q`: Close plugin
//!
//! In search mode:
//! - Characters / `Backspace`: Edit the query
//! - `Enter`: Keep the query and return to the cards
//! - `Esc`: Clear the query

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

use skiphire::app::CloseToken;
use skiphire::fetch::{request_context, request_id_from_context};
use skiphire::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Name of the pipe message carrying the hand-off payload.
const HANDOFF_MESSAGE: &str = "skip_selected";

const NETWORK_DENIED: &str = "network access was denied";

const PERMISSIONS: [PermissionType; 2] = [
    PermissionType::WebAccess,
    PermissionType::MessageAndLaunchOtherPlugins,
];

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns.
struct State {
    /// Core application state from library layer.
    app: skiphire::app::AppState,

    /// Endpoint to announce once network access is granted.
    endpoint: Option<String>,

    /// Destination plugin of the hand-off message.
    continue_plugin: Option<String>,

    /// Close tokens in the order their timers were set.
    ///
    /// Zellij timers carry no payload and fire in scheduling order, so each
    /// `Timer` event belongs to the oldest pending token.
    pending_closes: VecDeque<CloseToken>,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: skiphire::initialize(&default_config),
            endpoint: None,
            continue_plugin: None,
            pending_closes: VecDeque::new(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing and application state,
    /// requests permissions and subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Fetch offerings from the endpoint
    /// - `MessageAndLaunchOtherPlugins`: Send the hand-off message
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let (config, config_error) = Config::from_zellij_or_defaults(&configuration);
        skiphire::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            endpoint = ?config.endpoint,
            continue_plugin = ?config.continue_plugin,
            "parsed configuration"
        );

        self.app = skiphire::initialize(&config);
        if let Some(e) = config_error {
            tracing::error!(error = %e, "invalid configuration, using defaults");
            self.app.config_error = Some(e.to_string());
        }
        self.endpoint.clone_from(&config.endpoint);
        self.continue_plugin.clone_from(&config.continue_plugin);

        request_permission(&PERMISSIONS);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates Zellij events, delegates to `handle_event` and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                match Self::map_web_response(status, &headers, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => match self.pending_closes.pop_front() {
                Some(token) => Event::CloseTimerFired(token),
                None => {
                    tracing::debug!("timer fired with no pending close");
                    return false;
                }
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                match status {
                    PermissionStatus::Granted => {
                        tracing::debug!("permissions granted");
                        Event::EndpointChanged(self.endpoint.clone())
                    }
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - live prices unavailable");
                        Event::NetworkUnavailable(NETWORK_DENIED.to_string())
                    }
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        skiphire::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CursorDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CursorUp);
        }

        match self.app.input_mode {
            InputMode::Search => self.map_search_key(key),
            InputMode::Normal => self.map_normal_key(key),
        }
    }

    fn map_normal_key(&self, key: &KeyWithModifier) -> Option<Event> {
        let filters = &self.app.filters;
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::CursorDown,
            BareKey::Up | BareKey::Char('k') => Event::CursorUp,
            BareKey::Enter | BareKey::Char(' ') => Event::ActivateCard,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('r') => Event::AllowedOnRoadChanged(!filters.allowed_on_road_required),
            BareKey::Char('w') => Event::HeavyWasteChanged(!filters.heavy_waste_required),
            BareKey::Char('c') => Event::Continue,
            BareKey::Char('R') => Event::Retry,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_search_key(&self, key: &KeyWithModifier) -> Option<Event> {
        let query = &self.app.filters.search;
        Some(match key.bare_key {
            BareKey::Down => Event::CursorDown,
            BareKey::Up => Event::CursorUp,
            BareKey::Enter => Event::FinishSearch,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Backspace => {
                let mut text = query.clone();
                text.pop();
                Event::SearchChanged(text)
            }
            BareKey::Char(c) => Event::SearchChanged(format!("{query}{c}")),
            _ => return None,
        })
    }

    /// Maps a web request result to an offerings response.
    ///
    /// Responses not tagged as an offerings request are ignored.
    fn map_web_response(
        status: u16,
        headers: &BTreeMap<String, String>,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(request_id) = request_id_from_context(context) else {
            tracing::debug!("ignoring web response not issued for offerings");
            return None;
        };

        tracing::debug!(
            request_id = request_id,
            status = status,
            body_len = body.len(),
            "offerings response"
        );
        Some(Event::OfferingsResponse {
            request_id,
            status,
            has_headers: !headers.is_empty(),
            body,
        })
    }

    /// Sends the hand-off payload as a pipe message.
    fn send_handoff(&self, payload: String) {
        let mut message = MessageToPlugin::new(HANDOFF_MESSAGE).with_payload(payload);
        if let Some(url) = &self.continue_plugin {
            message = message.with_plugin_url(url);
        }
        pipe_message_to_plugin(message);
    }

    /// Executes an action returned from event handling.
    ///
    /// # Actions
    ///
    /// - `CloseFocus`: Close the plugin pane
/// - `RequestNetworkAccess`: Prompt for permissions again
    /// - `FetchOfferings`: `GET` the endpoint with the request id in the context
    /// - `ScheduleClose`: Queue the token and set a timer for the delay
    /// - `Continue`: Pipe the hand-off to the next stage and hide the pane
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin");
                self.pending_closes.clear();
                close_self();
            }
            Action::RequestNetworkAccess => {
                tracing::debug!("requesting permissions again");
                request_permission(&PERMISSIONS);
            }
            Action::FetchOfferings(request) => {
                tracing::debug!(request_id = request.id, url = %request.url, "fetching offerings");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request_context(request),
                );
            }
            Action::ScheduleClose { token, delay } => {
                self.pending_closes.push_back(*token);
                set_timeout(delay.as_secs_f64());
            }
            Action::Continue(handoff) => match handoff.to_json() {
                Ok(payload) => {
                    tracing::debug!(offering_id = handoff.offering_id, "handing off selection");
                    self.send_handoff(payload);
                    hide_self();
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize hand-off");
                }
            },
        }
    }
}
