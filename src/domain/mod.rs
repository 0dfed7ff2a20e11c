//! Domain layer for the skip selection plugin.
//!
//! Core types and pure business rules, independent of Zellij APIs: the
//! offering model, pricing, checkout steps and the error taxonomy.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`offering`]: Offering model and fallback catalogue
//! - [`pricing`]: Display price and hire period formatting
//! - [`steps`]: Checkout steps and their icons
//!
//! # Examples
//!
//! ```
//! use skiphire::domain::{fallback_offerings, pricing};
//!
//! let prices: Vec<i64> = fallback_offerings().iter().map(pricing::display_price).collect();
//! assert_eq!(prices, vec![253, 317, 354, 403, 468]);
//! ```

pub mod error;
pub mod offering;
pub mod pricing;
pub mod steps;

pub use error::{Result, SkipHireError};
pub use offering::{fallback_offerings, Offering, DEFAULT_ASSET_BASE_URL};
pub use steps::{Icon, ProgressSteps, StepId, StepStatus};
