//! Offerings fetch service.
//!
//! The plugin runs inside Zellij's WASM sandbox, so the network call itself
//! is made by the host through `web_request`. This module owns everything
//! around that call:
//!
//! - [`state`]: data/loading/error signals keyed by endpoint and request id
//! - [`payload`]: status and body decoding into [`Offering`](crate::Offering)s
//!
//! The request id rides along in the `web_request` context map so responses
//! can be matched to the request that produced them.
//!
//! ```text
//! configure(endpoint) ─► FetchRequest ─► Action::FetchOfferings ─► web_request
//!                                                                     │
//! settle(id, parse_response(status, body)) ◄── WebRequestResult ◄─────┘
//! ```

pub mod payload;
pub mod state;

pub use payload::parse_response;
pub use state::{FetchRequest, FetchState};

use std::collections::BTreeMap;

/// Context key naming the plugin that issued a request.
pub const CONTEXT_SOURCE_KEY: &str = "source";

/// Context key carrying the request id.
pub const CONTEXT_REQUEST_ID_KEY: &str = "request_id";

/// Value of [`CONTEXT_SOURCE_KEY`] for offerings requests.
pub const CONTEXT_SOURCE: &str = "skiphire-offerings";

/// Builds the `web_request` context map for a request.
#[must_use]
pub fn request_context(request: &FetchRequest) -> BTreeMap<String, String> {
    BTreeMap::from([
        (CONTEXT_SOURCE_KEY.to_string(), CONTEXT_SOURCE.to_string()),
        (CONTEXT_REQUEST_ID_KEY.to_string(), request.id.to_string()),
    ])
}

/// Recovers the request id from a `web_request` context map.
///
/// Returns `None` for responses to requests this module did not issue.
#[must_use]
pub fn request_id_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
    if context.get(CONTEXT_SOURCE_KEY).map(String::as_str) != Some(CONTEXT_SOURCE) {
        return None;
    }
    context.get(CONTEXT_REQUEST_ID_KEY)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trips_request_id() {
        let request = FetchRequest {
            id: 42,
            url: "https://api.example/skips".to_string(),
        };
        assert_eq!(request_id_from_context(&request_context(&request)), Some(42));
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_REQUEST_ID_KEY.to_string(), "3".to_string());
        assert_eq!(request_id_from_context(&context), None);

        context.insert(CONTEXT_SOURCE_KEY.to_string(), CONTEXT_SOURCE.to_string());
        context.insert(CONTEXT_REQUEST_ID_KEY.to_string(), "three".to_string());
        assert_eq!(request_id_from_context(&context), None);
    }
}
