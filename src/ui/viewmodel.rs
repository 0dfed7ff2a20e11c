//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready strings and flags only; no
//! pricing or filtering happens past this point.

use crate::domain::StepStatus;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Checkout progress strip at the top.
    pub progress: ProgressInfo,

    pub header: HeaderInfo,

    /// Search box and requirement checkboxes.
    pub filter_bar: FilterBarInfo,

    /// Informational lines such as the fallback data note.
    pub notices: Vec<Notice>,

    /// Main content: loading, error, empty or the card list.
    pub body: BodyState,

    /// Floating summary bar, present while selected or closing.
    pub summary: Option<SummaryInfo>,

    pub footer: FooterInfo,
}

/// Progress indicator content.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Steps to draw, in order. In compact layout only the current step.
    pub steps: Vec<StepItem>,

    /// `"Step 3 of 6"` in compact layout, `None` otherwise.
    pub position: Option<String>,
}

/// One step of the progress indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepItem {
    pub label: &'static str,
    pub glyph: &'static str,
    pub status: StepStatus,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

/// Filter panel values as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub query: String,
    /// Whether the search box has keyboard focus.
    pub typing: bool,
    pub allowed_on_road: bool,
    pub allows_heavy_waste: bool,
}

/// Severity of a notice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// A single informational line above the cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// What fills the main area.
#[derive(Debug, Clone)]
pub enum BodyState {
    /// The offerings request is in flight.
    Loading,

    /// The last offerings request failed.
    Error(ErrorInfo),

    /// Nothing to show.
    Empty(EmptyState),

    /// The visible window of offering cards.
    Cards(CardList),
}

/// Error panel content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    pub retry_hint: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Window of cards plus details of the card under the cursor.
#[derive(Debug, Clone)]
pub struct CardList {
    pub items: Vec<CardItem>,

    /// Image reference of the card under the cursor.
    pub cursor_detail: Option<String>,

    /// Glyph key for the restriction badges, present in compact layout.
    pub legend: Option<String>,

    /// Dimmed note about imagery and pricing, shown below the cards.
    pub disclaimer: &'static str,
}

impl CardList {
    /// Rows taken below the card rows by the legend and disclaimer.
    #[must_use]
    pub const fn footnote_rows(compact: bool) -> usize {
        if compact {
            2
        } else {
            1
        }
    }
}

/// Display information for a single offering card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub offering_id: u64,
    /// `"8 Yard Skip"`.
    pub title: String,
    /// `"8 Yards"`.
    pub size_badge: String,
    /// `"£354"`.
    pub price: String,
    pub hire_period: String,
    /// Transport and per-tonne costs, only those present.
    pub extras: Vec<String>,
    pub badges: Vec<Badge>,
    pub image_url: String,
    pub is_selected: bool,
    pub is_cursor: bool,
    /// `"Select"` or `"Selected"`.
    pub action_label: &'static str,
}

/// Restriction badge on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    NotAllowedOnRoad,
    Forbidden,
    NoHeavyWaste,
}

impl Badge {
    /// Every badge, in display order.
    pub const ALL: [Self; 3] = [Self::NotAllowedOnRoad, Self::Forbidden, Self::NoHeavyWaste];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotAllowedOnRoad => "Not Allowed On The Road",
            Self::Forbidden => "Forbidden",
            Self::NoHeavyWaste => "No Heavy Waste",
        }
    }

    /// Short form used when the pane is narrow.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::NotAllowedOnRoad => "⚠",
            Self::Forbidden => "✖",
            Self::NoHeavyWaste => "⊘",
        }
    }
}

/// Summary bar content for the selected or closing offering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryInfo {
    pub title: String,
    pub price: String,
    pub hire_period: String,
    pub extras: Vec<String>,
    pub forbidden: bool,
    /// Rendered dimmed while the selection is being dismissed.
    pub closing: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}
