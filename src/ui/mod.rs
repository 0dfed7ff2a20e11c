//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Cursor positioning and width-aware text helpers
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    Badge, BodyState, CardItem, CardList, EmptyState, ErrorInfo, FilterBarInfo, FooterInfo,
    HeaderInfo, Notice, NoticeKind, ProgressInfo, StepItem, SummaryInfo, UIViewModel,
};
