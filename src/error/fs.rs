//! File system errors

use super::DeployError;

/// Creates a file write error for `path`
pub fn write_failed(path: &std::path::Path, reason: impl std::fmt::Display) -> DeployError {
    DeployError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file read error for `path`
pub fn read_failed(path: &std::path::Path, reason: impl std::fmt::Display) -> DeployError {
    DeployError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
