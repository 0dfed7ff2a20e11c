//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain and fetch
//! layers. Nothing in here calls into Zellij.
//!
//! ```text
//! Keys / HTTP / Timers → Events → Event Handler → State Mutations → Actions → Side Effects
//!                                      ↑                                          ↓
//!                                      └────────── responses, timer ticks ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`card`]: Primary action of an offering card
//! - [`filter`]: Search text and requirement filters
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode
//! - [`selection`]: Selection lifecycle with its closing phase
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod card;
pub mod filter;
pub mod handler;
pub mod modes;
pub mod selection;
pub mod state;

pub use actions::{Action, Handoff};
pub use filter::FilterState;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use selection::{CloseToken, Selection, SelectionMachine, SelectionPhase};
pub use state::{AppState, ScreenSettings};
