//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij. It returns a `Vec<Action>` and
//! the plugin shim turns each one into the matching host call: a web
//! request, a permission prompt, a timer, a pipe message or closing and
//! hiding the pane.
//!
//! # Example
//!
//! ```rust
//! use skiphire::app::Action;
//! use skiphire::fetch::FetchRequest;
//!
//! let actions = vec![Action::FetchOfferings(FetchRequest {
//!     id: 1,
//!     url: "https://api.example/skips".to_string(),
//! })];
//! ```

use super::selection::CloseToken;
use crate::domain::pricing::{display_price, format_hire_period};
use crate::domain::Offering;
use crate::fetch::FetchRequest;
use serde::Serialize;
use std::time::Duration;

/// Commands produced by the event handler for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the plugin pane.
    CloseFocus,

    /// Asks the host for network access again.
    ///
    /// Once granted the runtime reports the endpoint with
    /// [`Event::EndpointChanged`](super::Event::EndpointChanged).
    RequestNetworkAccess,

    /// Issues a `GET` for the offerings list.
    FetchOfferings(FetchRequest),

    /// Schedules the end of the closing phase.
    ///
    /// When the delay elapses the runtime must feed
    /// [`Event::CloseTimerFired`](super::Event::CloseTimerFired) back with
    /// the same token.
    ScheduleClose {
        token: CloseToken,
        delay: Duration,
    },

    /// Hands the selected offering to the next checkout stage.
    Continue(Handoff),
}

/// Selected offering as passed on to the next checkout stage.
///
/// Serialized as JSON into the outbound pipe message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Handoff {
    pub offering_id: u64,
    pub size: u32,
    pub display_price: i64,
    pub hire_period_days: u32,
    pub hire_period: String,
    pub forbidden: bool,
}

impl Handoff {
    #[must_use]
    pub fn from_offering(offering: &Offering) -> Self {
        Self {
            offering_id: offering.id,
            size: offering.size,
            display_price: display_price(offering),
            hire_period_days: offering.hire_period_days,
            hire_period: format_hire_period(offering.hire_period_days),
            forbidden: offering.forbidden,
        }
    }

    /// JSON payload for the outbound message.
    ///
    /// # Errors
    ///
    /// Returns [`SkipHireError::Serialization`](crate::SkipHireError::Serialization)
    /// if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handoff_carries_derived_price_and_period() {
        let handoff = Handoff::from_offering(&Offering::new(3, 8, 14, 295.0, 20.0));
        assert_eq!(handoff.display_price, 354);
        assert_eq!(handoff.hire_period, "14 day hire period");

        let json: serde_json::Value = serde_json::from_str(&handoff.to_json().unwrap()).unwrap();
        assert_eq!(json["offering_id"], 3);
        assert_eq!(json["size"], 8);
        assert_eq!(json["forbidden"], false);
    }
}
