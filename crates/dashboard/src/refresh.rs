//! Overlapping-refresh supersession and the per-panel view state.
//!
//! Nothing cancels an in-flight fetch: a timer tick can overlap a manual
//! refresh of the same resource. Each resource therefore carries a
//! [`RefreshGate`] issuing monotonic tickets; a response is applied only if
//! no newer request for that resource has started since, so the freshest
//! request wins instead of the last arrival.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::ApiError;

/// Per-resource monotonic sequence of refresh requests.
#[derive(Clone, Default)]
pub struct RefreshGate {
    issued: Arc<AtomicU64>,
}

/// Ticket identifying one refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

impl RefreshGate {
    /// Register a new request and return its ticket.
    #[must_use]
    pub fn begin(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Whether the response for `ticket` may be applied: true only while it
    /// is still the newest request issued for this resource.
    #[must_use]
    pub fn admit(&self, ticket: RefreshTicket) -> bool {
        ticket.0 == self.issued.load(Ordering::Relaxed)
    }
}

/// View state of one dashboard panel.
///
/// Renders are a full replace from this state: a failed fetch swaps the
/// entire panel for an error placeholder instead of keeping stale data next
/// to the error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Section<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> From<Result<T, ApiError>> for Section<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_admit_response_of_the_only_outstanding_request() {
        let gate = RefreshGate::default();
        let ticket = gate.begin();
        assert!(gate.admit(ticket));
    }

    #[test]
    fn should_discard_stale_response_when_a_newer_request_started() {
        let gate = RefreshGate::default();
        let first = gate.begin();
        let second = gate.begin();
        assert!(!gate.admit(first));
        assert!(gate.admit(second));
    }

    #[test]
    fn should_keep_discarding_after_the_newest_response_arrived() {
        let gate = RefreshGate::default();
        let first = gate.begin();
        let second = gate.begin();
        assert!(gate.admit(second));
        // The slow first response still loses, in either arrival order.
        assert!(!gate.admit(first));
    }

    #[test]
    fn should_track_resources_independently_per_gate() {
        let status = RefreshGate::default();
        let devices = RefreshGate::default();
        let status_ticket = status.begin();
        let _devices_ticket = devices.begin();
        let newer_devices = devices.begin();
        assert!(status.admit(status_ticket));
        assert!(devices.admit(newer_devices));
    }

    #[test]
    fn should_map_results_into_section_states() {
        let ready: Section<u32> = Section::from(Ok(7));
        assert_eq!(ready, Section::Ready(7));

        let failed: Section<u32> = Section::from(Err(ApiError {
            message: "HTTP 502".to_string(),
        }));
        assert_eq!(failed, Section::Failed("HTTP 502".to_string()));

        assert_eq!(Section::<u32>::default(), Section::Loading);
    }
}
