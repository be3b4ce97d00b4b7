//! Preflight and cluster-client errors

use super::DeployError;

/// Creates a preflight error with an optional hint shown as diagnostic help
pub fn preflight_failed(message: impl Into<String>, hint: Option<&str>) -> DeployError {
    DeployError::PreflightFailed {
        message: message.into(),
        hint: hint.map(str::to_string),
    }
}

/// Creates an apply error for a single cluster action
pub fn apply_failed(action: impl std::fmt::Display, reason: impl Into<String>) -> DeployError {
    DeployError::ApplyActionFailed {
        action: action.to_string(),
        reason: reason.into(),
    }
}
