//! Application state and view model computation.
//!
//! [`AppState`] is the selection screen: it owns the fetch state, the filter
//! panel values, the selection lifecycle and the browsing cursor, and turns
//! them into a [`UIViewModel`] on demand.
//!
//! # State Components
//!
//! - **Fetch**: live offerings data, loading flag and error message
//! - **Fallback**: static offerings used when no endpoint is configured
//! - **Visible Offerings**: active list after filtering, in display order
//! - **Cursor**: browsing position within the visible offerings
//! - **Selection**: `None` / `Selected` / `Closing`
//! - **Input Mode**: browsing or typing into the search box
//!
//! # Example
//!
//! ```rust
//! use skiphire::app::{AppState, ScreenSettings};
//! use skiphire::ui::Theme;
//!
//! let mut state = AppState::new(ScreenSettings::default(), Theme::default());
//! state.apply_filters();
//! assert_eq!(state.visible_offerings.len(), 5);
//! let viewmodel = state.compute_viewmodel(30, 100);
//! assert!(viewmodel.summary.is_none());
//! ```

use super::filter::FilterState;
use super::modes::InputMode;
use super::selection::{Selection, SelectionMachine};
use crate::domain::pricing::{display_price, format_hire_period, format_money, format_price};
use crate::domain::{fallback_offerings, Offering, ProgressSteps, StepStatus, DEFAULT_ASSET_BASE_URL};
use crate::fetch::FetchState;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Badge, BodyState, CardItem, CardList, EmptyState, ErrorInfo, FilterBarInfo, FooterInfo,
    HeaderInfo, Notice, NoticeKind, ProgressInfo, StepItem, SummaryInfo, UIViewModel,
};
use std::time::Duration;

/// Default length of the closing phase.
pub const DEFAULT_CLOSING_DELAY: Duration = Duration::from_millis(300);

/// Panes narrower than this get the compact progress indicator.
pub const COMPACT_WIDTH: usize = 80;

/// Rows taken by everything except the card rows and optional parts.
///
/// Blank line, progress, title, subtitle, border, filter box (3), table
/// header, cursor detail, border, footer.
const BASE_CHROME_ROWS: usize = 12;

/// Rows taken by the summary bar when visible.
pub const SUMMARY_ROWS: usize = 3;

const DISCLAIMER: &str = "Imagery and information shown may not reflect the exact shape or size specification, colours may vary. Options and/or accessories may be featured at additional cost.";

/// Construction-time settings of the selection screen.
#[derive(Debug, Clone)]
pub struct ScreenSettings {
    /// Pricing endpoint; `None` shows the fallback offerings.
    pub endpoint: Option<String>,
    /// Base URL for the skip images.
    pub asset_base_url: String,
    /// Length of the closing phase.
    pub closing_delay: Duration,
    /// Steps shown by the progress indicator.
    pub steps: ProgressSteps,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            closing_delay: DEFAULT_CLOSING_DELAY,
            steps: ProgressSteps::checkout(),
        }
    }
}

/// Central application state container.
///
/// Mutated only by [`handle_event`](super::handle_event). Every field is
/// public for the renderer and tests, but invariants (visible list in sync
/// with filters, cursor in bounds, no dangling selection) are maintained by
/// the handler through [`apply_filters`](Self::apply_filters) and
/// [`reconcile_selection`](Self::reconcile_selection).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Offerings request state.
    pub fetch: FetchState,

    /// Configured endpoint. Decides between live and fallback data.
    pub endpoint: Option<String>,

    /// Static offerings used without an endpoint.
    pub fallback: Vec<Offering>,

    /// Active offerings after filtering.
    ///
    /// Recomputed by `apply_filters()` after every relevant change.
    pub visible_offerings: Vec<Offering>,

    /// Search text and requirement flags.
    pub filters: FilterState,

    /// Selection lifecycle.
    pub selection: SelectionMachine,

    /// Zero-based browsing position within `visible_offerings`.
    pub cursor: usize,

    pub input_mode: InputMode,

    pub steps: ProgressSteps,

    pub asset_base_url: String,

    pub closing_delay: Duration,

    /// Configuration problem to surface, if the plugin fell back to defaults.
    pub config_error: Option<String>,

    /// Set once the pane is closed; every later event is ignored.
    pub torn_down: bool,

    pub theme: Theme,
}

impl AppState {
    /// Creates the screen with no selection, empty filters and fallback data
    /// prepared.
    #[must_use]
    pub fn new(settings: ScreenSettings, theme: Theme) -> Self {
        Self {
            fetch: FetchState::new(),
            endpoint: settings.endpoint,
            fallback: fallback_offerings(),
            visible_offerings: vec![],
            filters: FilterState::default(),
            selection: SelectionMachine::new(),
            cursor: 0,
            input_mode: InputMode::Normal,
            steps: settings.steps,
            asset_base_url: settings.asset_base_url,
            closing_delay: settings.closing_delay,
            config_error: None,
            torn_down: false,
            theme,
        }
    }

    /// Whether offerings come from the endpoint rather than the fallback.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.endpoint.is_some()
    }

    /// The list filtering starts from: fetched data or fallback data.
    #[must_use]
    pub fn active_offerings(&self) -> &[Offering] {
        if self.is_live() {
            self.fetch.data()
        } else {
            &self.fallback
        }
    }

    /// Recomputes `visible_offerings` and clamps the cursor.
    pub fn apply_filters(&mut self) {
        let _span = tracing::debug_span!(
            "apply_filters",
            active_offerings = self.active_offerings().len(),
            query_len = self.filters.search.len(),
            allowed_on_road = self.filters.allowed_on_road_required,
            heavy_waste = self.filters.heavy_waste_required
        )
        .entered();

        self.visible_offerings = self.filters.apply(self.active_offerings());

        if self.visible_offerings.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(self.visible_offerings.len() - 1);
        }

        tracing::debug!(visible_count = self.visible_offerings.len(), "filters applied");
    }

    /// Clears the selection if its offering left the active list.
    ///
    /// Returns `true` if the selection changed.
    pub fn reconcile_selection(&mut self) -> bool {
        let active = if self.is_live() { self.fetch.data() } else { &self.fallback };
        self.selection.reconcile(active)
    }

    /// Moves the cursor down by one card, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        if self.visible_offerings.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.visible_offerings.len();
    }

    /// Moves the cursor up by one card, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        if self.visible_offerings.is_empty() {
            return;
        }
        if self.cursor == 0 {
            self.cursor = self.visible_offerings.len() - 1;
        } else {
            self.cursor -= 1;
        }
    }

    /// Offering under the cursor, if any card is visible.
    #[must_use]
    pub fn cursor_offering(&self) -> Option<&Offering> {
        self.visible_offerings.get(self.cursor)
    }

    /// The selected offering resolved against the active list.
    ///
    /// `None` while closing: nothing is logically selected then.
    #[must_use]
    pub fn selected_offering(&self) -> Option<&Offering> {
        let id = self.selection.selected_id()?;
        self.active_offerings().iter().find(|o| o.id == id)
    }

    /// Whether the body currently shows cards (not loading or an error).
    #[must_use]
    pub fn shows_cards(&self) -> bool {
        !self.fetch.is_loading() && self.fetch.error().is_none()
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Subtract the chrome (progress, header, filters, notices, summary)
    /// 2. Center the window on the cursor
    /// 3. Pull the window back when near the end so it stays full
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let notices = self.compute_notices();
        let summary = self.compute_summary();
        let available_rows = Self::calculate_available_rows(rows, notices.len(), summary.is_some());

        UIViewModel {
            progress: self.compute_progress(cols),
            header: self.compute_header(),
            filter_bar: self.compute_filter_bar(),
            body: self.compute_body(available_rows, cols),
            notices,
            summary,
            footer: self.compute_footer(),
        }
    }

    fn compute_body(&self, available_rows: usize, cols: usize) -> BodyState {
        if self.fetch.is_loading() {
            return BodyState::Loading;
        }

        if let Some(message) = self.fetch.error() {
            return BodyState::Error(ErrorInfo {
                message: message.to_string(),
                retry_hint: "Press R to try again".to_string(),
            });
        }

        if self.active_offerings().is_empty() {
            return BodyState::Empty(EmptyState {
                message: "No skips available".to_string(),
                subtitle: if self.fetch.endpoint().is_some() {
                    "Press R to reload the list".to_string()
                } else {
                    "Waiting for network access to load live prices".to_string()
                },
            });
        }

        if self.visible_offerings.is_empty() {
            return BodyState::Empty(EmptyState {
                message: "No skips match your filters".to_string(),
                subtitle: "Clear the search with Esc or toggle filters with r / w".to_string(),
            });
        }

        let compact = cols < COMPACT_WIDTH;
        let available_rows = available_rows
            .saturating_sub(CardList::footnote_rows(compact))
            .max(1);
        let mut visible_start = self.cursor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.visible_offerings.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.visible_offerings.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let items = self.visible_offerings[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, offering)| {
                self.compute_card_item(offering, visible_start + relative_idx == self.cursor)
            })
            .collect();

        let cursor_detail = self
            .cursor_offering()
            .map(|o| format!("Image: {}", o.image_url(&self.asset_base_url)));

        BodyState::Cards(CardList {
            items,
            cursor_detail,
            legend: compact.then(Self::badge_legend),
            disclaimer: DISCLAIMER,
        })
    }

    fn badge_legend() -> String {
        Badge::ALL
            .iter()
            .map(|badge| format!("{} {}", badge.glyph(), badge.label()))
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn compute_card_item(&self, offering: &Offering, is_cursor: bool) -> CardItem {
        let is_selected = self.selection.is_selected(offering.id);

        let mut badges = Vec::new();
        if !offering.allowed_on_road {
            badges.push(Badge::NotAllowedOnRoad);
        }
        if offering.forbidden {
            badges.push(Badge::Forbidden);
        }
        if !offering.allows_heavy_waste {
            badges.push(Badge::NoHeavyWaste);
        }

        CardItem {
            offering_id: offering.id,
            title: format!("{} Yard Skip", offering.size),
            size_badge: format!("{} Yards", offering.size),
            price: format_price(display_price(offering)),
            hire_period: format_hire_period(offering.hire_period_days),
            extras: Self::secondary_costs(offering),
            badges,
            image_url: offering.image_url(&self.asset_base_url),
            is_selected,
            is_cursor,
            action_label: if is_selected { "Selected" } else { "Select" },
        }
    }

    fn secondary_costs(offering: &Offering) -> Vec<String> {
        let mut extras = Vec::new();
        if let Some(cost) = offering.transport_cost {
            extras.push(format!("Transport: {}", format_money(cost)));
        }
        if let Some(cost) = offering.per_tonne_cost {
            extras.push(format!("Per tonne: {}", format_money(cost)));
        }
        extras
    }

    /// Summary bar content; visible while selected and while closing.
    fn compute_summary(&self) -> Option<SummaryInfo> {
        let (offering, closing) = match self.selection.selection() {
            Selection::None => return None,
            Selection::Selected(_) => (self.selected_offering()?, false),
            Selection::Closing { offering, .. } => (offering, true),
        };

        Some(SummaryInfo {
            title: format!("{} Yard Skip", offering.size),
            price: format_price(display_price(offering)),
            hire_period: format_hire_period(offering.hire_period_days),
            extras: Self::secondary_costs(offering),
            forbidden: offering.forbidden,
            closing,
        })
    }

    fn compute_progress(&self, cols: usize) -> ProgressInfo {
        let items = self.steps.iter().map(|(step, status)| StepItem {
            label: step.label(),
            glyph: step.icon().glyph(),
            status,
        });

        if cols < COMPACT_WIDTH {
            ProgressInfo {
                steps: items.filter(|item| item.status == StepStatus::Current).collect(),
                position: Some(format!(
                    "Step {} of {}",
                    self.steps.current_position(),
                    self.steps.len()
                )),
            }
        } else {
            ProgressInfo {
                steps: items.collect(),
                position: None,
            }
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(" Choose Your Skip Size ({}) ", self.visible_offerings.len()),
            subtitle: "Select the skip size that best suits your needs. All prices include delivery, collection, and disposal.".to_string(),
        }
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        FilterBarInfo {
            query: self.filters.search.clone(),
            typing: self.input_mode == InputMode::Search,
            allowed_on_road: self.filters.allowed_on_road_required,
            allows_heavy_waste: self.filters.heavy_waste_required,
        }
    }

    fn compute_notices(&self) -> Vec<Notice> {
        let mut notices = Vec::new();
        if let Some(error) = &self.config_error {
            notices.push(Notice {
                kind: NoticeKind::Warning,
                text: format!("{error} (using defaults)"),
            });
        }
        if !self.is_live() && self.shows_cards() {
            notices.push(Notice {
                kind: NoticeKind::Info,
                text: "Using fallback data. Set `endpoint` in the plugin configuration to fetch real-time skip data.".to_string(),
            });
        }
        notices
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search => {
                "Type to search by size  Backspace: delete  Enter: done  Esc: clear".to_string()
            }
            InputMode::Normal => {
                let mut hints = vec!["j/k: move", "Enter: select", "/: search", "r: on road", "w: heavy waste"];
                if self.selected_offering().is_some() {
                    hints.push("c: continue");
                }
                if self.fetch.error().is_some() {
                    hints.push("R: retry");
                }
                hints.push("q: quit");
                hints.join("  ")
            }
        };
        FooterInfo { keybindings }
    }

    /// Rows left for card rows once chrome, notices and the summary bar are
    /// placed.
    const fn calculate_available_rows(total_rows: usize, notices: usize, has_summary: bool) -> usize {
        let summary = if has_summary { SUMMARY_ROWS } else { 0 };
        total_rows.saturating_sub(BASE_CHROME_ROWS + notices + summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::selection::SelectionPhase;

    fn state() -> AppState {
        let mut state = AppState::new(ScreenSettings::default(), Theme::default());
        state.apply_filters();
        state
    }

    fn cards(vm: &UIViewModel) -> &[CardItem] {
        match &vm.body {
            BodyState::Cards(list) => &list.items,
            other => panic!("expected cards, got {other:?}"),
        }
    }

    #[test]
    fn fallback_data_is_shown_and_annotated_without_endpoint() {
        let state = state();
        let vm = state.compute_viewmodel(40, 120);

        assert_eq!(cards(&vm).len(), 5);
        assert!(vm.notices.iter().any(|n| n.text.starts_with("Using fallback data")));
        assert_eq!(vm.header.title, " Choose Your Skip Size (5) ");
    }

    #[test]
    fn card_shows_price_period_and_independent_badges() {
        let mut state = state();
        let mut offering = Offering::new(9, 10, 7, 336.0, 20.0);
        offering.allowed_on_road = false;
        offering.forbidden = true;
        offering.transport_cost = Some(30.0);
        state.fallback = vec![offering];
        state.apply_filters();

        let vm = state.compute_viewmodel(40, 120);
        let card = &cards(&vm)[0];
        assert_eq!(card.title, "10 Yard Skip");
        assert_eq!(card.size_badge, "10 Yards");
        assert_eq!(card.price, "£403");
        assert_eq!(card.hire_period, "7 day hire period");
        assert_eq!(card.extras, vec!["Transport: £30".to_string()]);
        assert_eq!(card.badges, vec![Badge::NotAllowedOnRoad, Badge::Forbidden]);
        assert!(card.image_url.ends_with("/10-yarder-skip.jpg"));
        assert_eq!(card.action_label, "Select");
    }

    #[test]
    fn cursor_wraps_in_both_directions() {
        let mut state = state();
        state.move_cursor_up();
        assert_eq!(state.cursor, 4);
        state.move_cursor_down();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn filtering_clamps_cursor() {
        let mut state = state();
        state.cursor = 4;
        state.filters.allowed_on_road_required = true;
        state.apply_filters();
        assert_eq!(state.cursor, 2);
        assert_eq!(state.cursor_offering().map(|o| o.size), Some(8));
    }

    #[test]
    fn window_follows_cursor_on_short_panes() {
        let mut state = state();
        state.cursor = 4;
        // 12 chrome rows, the fallback notice and the disclaimer leave 2 card rows.
        let vm = state.compute_viewmodel(16, 120);
        let items = cards(&vm);
        assert_eq!(items.len(), 2);
        assert!(items[1].is_cursor);
        assert_eq!(items[1].offering_id, 5);
    }

    #[test]
    fn loading_and_error_replace_the_cards() {
        let mut state = AppState::new(
            ScreenSettings {
                endpoint: Some("https://api.example/skips".to_string()),
                ..ScreenSettings::default()
            },
            Theme::default(),
        );
        let request = state.fetch.configure(state.endpoint.clone()).unwrap();
        assert!(matches!(state.compute_viewmodel(40, 120).body, BodyState::Loading));

        state.fetch.settle(request.id, crate::fetch::parse_response(404, b""));
        match state.compute_viewmodel(40, 120).body {
            BodyState::Error(info) => assert!(info.message.contains("404")),
            other => panic!("expected error, got {other:?}"),
        }
        assert!(state.compute_viewmodel(40, 120).notices.is_empty());
    }

    #[test]
    fn compact_progress_shows_only_current_step() {
        let state = state();
        let compact = state.compute_viewmodel(40, 60).progress;
        assert_eq!(compact.steps.len(), 1);
        assert_eq!(compact.steps[0].label, "Select Skip");
        assert_eq!(compact.position.as_deref(), Some("Step 3 of 6"));

        let wide = state.compute_viewmodel(40, 120).progress;
        assert_eq!(wide.steps.len(), 6);
        assert!(wide.position.is_none());
    }

    #[test]
    fn selection_of_missing_offering_resolves_to_none() {
        let mut state = state();
        crate::app::handle_event(&mut state, &crate::app::Event::Select(42)).unwrap();
        assert_eq!(state.selection.phase(), SelectionPhase::None);
        assert!(state.compute_viewmodel(40, 120).summary.is_none());

        state.selection.select(42);
        assert!(state.reconcile_selection());
        assert_eq!(state.selection.phase(), SelectionPhase::None);
    }

    #[test]
    fn compact_layout_adds_badge_legend() {
        let state = state();
        let BodyState::Cards(list) = state.compute_viewmodel(40, 60).body else {
            panic!("expected cards");
        };
        assert_eq!(
            list.legend.as_deref(),
            Some("⚠ Not Allowed On The Road  ✖ Forbidden  ⊘ No Heavy Waste")
        );
        assert!(list.disclaimer.starts_with("Imagery and information"));

        let BodyState::Cards(wide) = state.compute_viewmodel(40, 120).body else {
            panic!("expected cards");
        };
        assert!(wide.legend.is_none());
    }

    #[test]
    fn legend_row_is_taken_from_the_card_window() {
        let state = state();
        // 12 chrome rows, the fallback notice, legend and disclaimer leave 2.
        let compact = state.compute_viewmodel(17, 60);
        assert_eq!(cards(&compact).len(), 2);

        let wide = state.compute_viewmodel(17, 120);
        assert_eq!(cards(&wide).len(), 3);
    }
}
