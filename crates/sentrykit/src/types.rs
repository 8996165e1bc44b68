//! Core types shared by the client and the reconcilers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Normalized outcome of one API call or one reconciliation.
///
/// `failed` is set exactly when the status code differs from the one the
/// operation expects, and `changed` only for a successful create, update
/// or delete. Callers should trust `changed` only when `failed` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Remote state was mutated.
    pub changed: bool,
    /// The call returned an unexpected status.
    pub failed: bool,
    /// Human-readable summary.
    pub message: String,
    /// HTTP status of the last call (0 when no request was sent).
    pub status_code: u16,
    /// URL of the last call.
    pub url: String,
    /// Decoded response body.
    pub response: Value,
}

impl OperationResult {
    /// Result reported in check mode, where no request is sent.
    #[must_use]
    pub fn check_mode() -> Self {
        Self {
            changed: false,
            failed: false,
            message: "Check mode success!".to_string(),
            status_code: 0,
            url: String::new(),
            response: Value::Null,
        }
    }

    /// Whether the outcome is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.failed
    }
}

/// Whether the resource should exist after reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    /// Create or update the resource.
    #[default]
    Present,
    /// Delete the resource.
    Absent,
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("present"),
            Self::Absent => f.write_str("absent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_mode_result() {
        let result = OperationResult::check_mode();
        assert!(!result.changed);
        assert!(result.is_success());
        assert_eq!(result.message, "Check mode success!");
        assert_eq!(result.status_code, 0);
    }

    #[test]
    fn test_operation_result_serializes_contract_fields() {
        let result = OperationResult {
            changed: true,
            failed: false,
            message: "Team has been created".to_string(),
            status_code: 201,
            url: "http://localhost:9000/api/0/organizations/sentry/teams/".to_string(),
            response: json!({"slug": "backend-team"}),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["changed"], json!(true));
        assert_eq!(value["failed"], json!(false));
        assert_eq!(value["status_code"], json!(201));
        assert_eq!(value["response"]["slug"], json!("backend-team"));
    }

    #[test]
    fn test_target_state_default_and_serde() {
        assert_eq!(TargetState::default(), TargetState::Present);
        let state: TargetState = serde_json::from_str("\"absent\"").unwrap();
        assert_eq!(state, TargetState::Absent);
        assert_eq!(TargetState::Present.to_string(), "present");
    }
}
