//! Firmware update availability and the apply-update report.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/check-updates`.
///
/// Historical backend builds disagree on the availability field name
/// (`available` vs `update_available`); the alias absorbs both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatus {
    #[serde(alias = "update_available")]
    pub available: bool,
    pub current_version: String,
    #[serde(default)]
    pub latest_version: Option<String>,
    #[serde(default)]
    pub release_notes: Option<String>,
}

impl UpdateStatus {
    /// The version an update would install, if one is actually pending.
    ///
    /// Normalizes inconsistent backends: returns `None` unless `available`
    /// is set and `latest_version` is present and differs from
    /// `current_version`.
    #[must_use]
    pub fn pending_version(&self) -> Option<&str> {
        if !self.available {
            return None;
        }
        self.latest_version
            .as_deref()
            .filter(|latest| *latest != self.current_version)
    }
}

/// Response of `POST /api/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_pending_version_when_update_is_available() {
        let status: UpdateStatus = serde_json::from_str(
            r#"{"available": true, "current_version": "1.2.0", "latest_version": "1.3.0"}"#,
        )
        .unwrap();
        assert_eq!(status.pending_version(), Some("1.3.0"));
    }

    #[test]
    fn should_accept_legacy_update_available_field_name() {
        let status: UpdateStatus = serde_json::from_str(
            r#"{"update_available": true, "current_version": "1.2.0", "latest_version": "1.3.0"}"#,
        )
        .unwrap();
        assert!(status.available);
        assert_eq!(status.pending_version(), Some("1.3.0"));
    }

    #[test]
    fn should_report_no_pending_version_when_up_to_date() {
        let status: UpdateStatus = serde_json::from_str(
            r#"{"available": false, "current_version": "1.3.0"}"#,
        )
        .unwrap();
        assert_eq!(status.pending_version(), None);
        assert_eq!(status.release_notes, None);
    }

    #[test]
    fn should_normalize_available_flag_without_a_newer_version() {
        // Backend claims availability but reports the running version.
        let status: UpdateStatus = serde_json::from_str(
            r#"{"available": true, "current_version": "1.3.0", "latest_version": "1.3.0"}"#,
        )
        .unwrap();
        assert_eq!(status.pending_version(), None);
    }

    #[test]
    fn should_decode_update_report_with_partial_fields() {
        let report: UpdateReport =
            serde_json::from_str(r#"{"success": true, "message": "update applied"}"#).unwrap();
        assert!(report.success);
        assert_eq!(report.message.as_deref(), Some("update applied"));
        assert_eq!(report.status, None);
    }
}
