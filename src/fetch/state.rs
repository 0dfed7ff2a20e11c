//! Observable state of the offerings request.
//!
//! [`FetchState`] tracks the last configured endpoint, the latest issued
//! request and the three signals the UI reads: data, loading and error. It
//! never performs I/O itself; it hands out [`FetchRequest`]s for the plugin
//! runtime to issue and accepts their outcomes through [`FetchState::settle`].

use crate::domain::error::{Result, SkipHireError};
use crate::domain::Offering;

/// A request the plugin runtime must issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Monotonic request identifier, echoed back on settlement.
    pub id: u64,
    /// URL to `GET`.
    pub url: String,
}

/// Offerings data, loading flag and error message for one endpoint.
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    data: Vec<Offering>,
    loading: bool,
    error: Option<String>,
    endpoint: Option<String>,
    last_issued: u64,
    in_flight: Option<u64>,
}

impl FetchState {
    /// Creates the initial state: no data, not loading, no error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully fetched offerings, empty until the first success.
    #[must_use]
    pub fn data(&self) -> &[Offering] {
        &self.data
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed request, if the latest one failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The endpoint currently configured, if any.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Points the state at an endpoint, returning the request to issue.
    ///
    /// Returns `None` when there is no endpoint, or when the endpoint is the
    /// one already configured; only a new or changed endpoint starts a
    /// request. Starting a request sets `loading` and clears the error.
    pub fn configure(&mut self, endpoint: Option<String>) -> Option<FetchRequest> {
        let endpoint = endpoint.filter(|e| !e.trim().is_empty());
        if endpoint == self.endpoint {
            tracing::trace!(endpoint = ?endpoint, "endpoint unchanged, not fetching");
            return None;
        }

        self.endpoint = endpoint;
        match self.endpoint.clone() {
            Some(url) => Some(self.issue(url)),
            None => {
                tracing::debug!("endpoint cleared, dropping in-flight request");
                self.in_flight = None;
                self.loading = false;
                None
            }
        }
    }

    /// Re-issues the request for the current endpoint.
    ///
    /// No-op without an endpoint or while a request is already in flight.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            tracing::debug!("retry ignored, request already in flight");
            return None;
        }
        let url = self.endpoint.clone()?;
        Some(self.issue(url))
    }

    /// Records that no request can be issued at all, for example because
    /// network access was refused.
    ///
    /// Drops any in-flight request and shows `reason` as a transport error.
    /// The endpoint stays unconfigured, so a later [`configure`](Self::configure)
    /// with the same URL still issues a request.
    pub fn mark_unavailable(&mut self, reason: &str) {
        tracing::warn!(reason = %reason, "offerings request unavailable");
        self.in_flight = None;
        self.loading = false;
        self.error = Some(SkipHireError::Transport(reason.to_string()).to_string());
    }

    fn issue(&mut self, url: String) -> FetchRequest {
        self.last_issued += 1;
        self.in_flight = Some(self.last_issued);
        self.loading = true;
        self.error = None;
        tracing::debug!(request_id = self.last_issued, url = %url, "issuing offerings request");
        FetchRequest {
            id: self.last_issued,
            url,
        }
    }

    /// Applies the outcome of request `id`.
    ///
    /// Only the latest issued request may settle; older responses are
    /// discarded and `false` is returned. A success replaces the data in
    /// full; a failure records its message and keeps the previous data.
    pub fn settle(&mut self, id: u64, outcome: Result<Vec<Offering>>) -> bool {
        let _span = tracing::debug_span!("settle_fetch", request_id = id).entered();

        if self.in_flight != Some(id) {
            tracing::debug!(in_flight = ?self.in_flight, "discarding stale response");
            return false;
        }

        self.in_flight = None;
        self.loading = false;
        match outcome {
            Ok(offerings) => {
                tracing::debug!(offering_count = offerings.len(), "offerings loaded");
                self.data = offerings;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "offerings request failed");
                self.error = Some(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SkipHireError;
    use crate::fetch::parse_response;

    const ENDPOINT: &str = "https://api.example/skips?postcode=NR32";

    #[test]
    fn no_endpoint_never_fetches() {
        let mut fetch = FetchState::new();
        assert_eq!(fetch.configure(None), None);
        assert_eq!(fetch.configure(Some("  ".to_string())), None);
        assert_eq!(fetch.retry(), None);
        assert!(fetch.data().is_empty());
        assert!(!fetch.is_loading());
        assert_eq!(fetch.error(), None);
    }

    #[test]
    fn endpoint_issues_exactly_one_request() {
        let mut fetch = FetchState::new();
        let request = fetch.configure(Some(ENDPOINT.to_string())).unwrap();
        assert_eq!(request.url, ENDPOINT);
        assert!(fetch.is_loading());

        assert_eq!(fetch.configure(Some(ENDPOINT.to_string())), None);
        assert_eq!(fetch.retry(), None);
    }

    #[test]
    fn http_500_sets_error_and_keeps_initial_data() {
        let mut fetch = FetchState::new();
        let request = fetch.configure(Some(ENDPOINT.to_string())).unwrap();

        assert!(fetch.settle(request.id, parse_response(500, b"")));

        assert!(!fetch.error().unwrap_or_default().is_empty());
        assert!(!fetch.is_loading());
        assert!(fetch.data().is_empty());
    }

    #[test]
    fn success_replaces_data_in_order() {
        let mut fetch = FetchState::new();
        let request = fetch.configure(Some(ENDPOINT.to_string())).unwrap();
        let body = br#"[
            {"id": 2, "size": 6, "hire_period_days": 14, "price_before_vat": 264, "vat": 20},
            {"id": 1, "size": 4, "hire_period_days": 14, "price_before_vat": 211, "vat": 20}
        ]"#;

        assert!(fetch.settle(request.id, parse_response(200, body)));

        let ids: Vec<u64> = fetch.data().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(!fetch.is_loading());
        assert_eq!(fetch.error(), None);
    }

    #[test]
    fn failure_keeps_last_known_data() {
        let mut fetch = FetchState::new();
        let first = fetch.configure(Some(ENDPOINT.to_string())).unwrap();
        fetch.settle(first.id, Ok(vec![Offering::new(1, 4, 14, 211.0, 20.0)]));

        let retry = fetch.retry().unwrap();
        assert!(fetch.is_loading());
        assert_eq!(fetch.error(), None);
        fetch.settle(retry.id, Err(SkipHireError::Transport("timed out".into())));

        assert_eq!(fetch.data().len(), 1);
        assert_eq!(fetch.error(), Some("Failed to fetch skip data: timed out"));
    }

    #[test]
    fn last_issued_request_wins() {
        let mut fetch = FetchState::new();
        let old = fetch.configure(Some(ENDPOINT.to_string())).unwrap();
        let new = fetch.configure(Some("https://api.example/other".to_string())).unwrap();
        assert!(new.id > old.id);

        assert!(fetch.settle(new.id, Ok(vec![Offering::new(9, 20, 7, 500.0, 20.0)])));
        assert!(!fetch.settle(old.id, Ok(vec![])));

        assert_eq!(fetch.data()[0].id, 9);
        assert!(!fetch.is_loading());
    }

    #[test]
    fn clearing_endpoint_stops_loading_and_ignores_late_response() {
        let mut fetch = FetchState::new();
        let request = fetch.configure(Some(ENDPOINT.to_string())).unwrap();
        assert_eq!(fetch.configure(None), None);
        assert!(!fetch.is_loading());
        assert!(!fetch.settle(request.id, Ok(vec![])));
    }

    #[test]
    fn unavailable_network_shows_error_and_allows_later_configure() {
        let mut fetch = FetchState::new();
        fetch.mark_unavailable("network access was denied");

        assert_eq!(
            fetch.error(),
            Some("Failed to fetch skip data: network access was denied")
        );
        assert!(!fetch.is_loading());
        assert_eq!(fetch.endpoint(), None);

        let request = fetch.configure(Some(ENDPOINT.to_string()));
        assert!(request.is_some());
        assert_eq!(fetch.error(), None);
    }
}
