//! Error types and handling for cp4i-deploy
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Errors fall into two groups:
//! - pre-flight errors (resolution, selection, preflight, invalid arguments) that
//!   unwind straight to `main` and terminate the run
//! - record/action level errors (missing channel, failed apply) that are logged
//!   and collected while the rest of the batch proceeds
//!
//! Sub-modules hold convenience constructors by domain:
//! - [`cluster`]: preflight and cluster-client errors
//! - [`fs`]: file system errors

pub mod cluster;
pub mod fs;

pub use cluster::{apply_failed, preflight_failed};
pub use fs::write_failed as file_write_failed;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for deploy operations
#[derive(Error, Diagnostic, Debug)]
pub enum DeployError {
    // Metadata errors
    #[error("Is version {version} valid? Could not resolve operators: {cause}")]
    #[diagnostic(
        code(cp4i::resolve::failed),
        help("Run 'cp4i-deploy deploy --version <v> --list' against a known version or pass --metadata")
    )]
    ResolutionFailed { version: String, cause: String },

    #[error("Version '{version}' not found in metadata catalog (known: {known})")]
    #[diagnostic(code(cp4i::resolve::unknown_version))]
    UnknownVersion { version: String, known: String },

    #[error("Failed to read metadata catalog: {path}: {reason}")]
    #[diagnostic(code(cp4i::resolve::read_failed))]
    MetadataReadFailed { path: String, reason: String },

    #[error("Failed to parse metadata catalog: {path}: {reason}")]
    #[diagnostic(code(cp4i::resolve::parse_failed))]
    MetadataParseFailed { path: String, reason: String },

    // Selection errors
    #[error("Operator '{name}' is not a valid operator name")]
    #[diagnostic(
        code(cp4i::selection::unknown_operator),
        help("Use --list to show the operators available for this version")
    )]
    UnknownOperator { name: String },

    // Preflight errors
    #[error("Preflight check failed: {message}")]
    #[diagnostic(code(cp4i::preflight::failed))]
    PreflightFailed {
        message: String,
        #[help]
        hint: Option<String>,
    },

    // Fetch errors
    #[error("Failed to prepare download directory {path}: {reason}")]
    #[diagnostic(code(cp4i::fetch::download_dir))]
    DownloadDirFailed { path: String, reason: String },

    #[error("Packaging tool failed for {package} {version}: {reason}")]
    #[diagnostic(code(cp4i::fetch::tool_failed))]
    PackagingToolFailed {
        package: String,
        version: String,
        reason: String,
    },

    // Manifest errors
    #[error("No channel found for operator '{literal_name}', subscription skipped")]
    #[diagnostic(
        code(cp4i::manifest::missing_channel),
        help("Add a channel for this operator to the metadata catalog")
    )]
    MissingChannel { literal_name: String },

    // Apply errors
    #[error("Cluster action failed: {action}: {reason}")]
    #[diagnostic(code(cp4i::apply::action_failed))]
    ApplyActionFailed { action: String, reason: String },

    #[error("Failed to read confirmation: {message}")]
    #[diagnostic(code(cp4i::apply::confirmation_failed))]
    ConfirmationFailed { message: String },

    // Configuration errors
    #[error("Invalid arguments: {message}")]
    #[diagnostic(code(cp4i::config::invalid_arguments))]
    InvalidArguments { message: String },

    #[error("Failed to load policy file: {path}: {reason}")]
    #[diagnostic(code(cp4i::config::policy_failed))]
    PolicyLoadFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(cp4i::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(cp4i::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(cp4i::fs::io_error))]
    IoError { message: String },
}

impl DeployError {
    /// Process exit code for this error when it reaches `main`
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::InvalidArguments { .. } => 2,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for DeployError {
    fn from(err: std::io::Error) -> Self {
        DeployError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for DeployError {
    fn from(err: serde_yaml::Error) -> Self {
        DeployError::MetadataParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DeployError {
    fn from(err: serde_json::Error) -> Self {
        DeployError::IoError {
            message: format!("JSON serialization failed: {err}"),
        }
    }
}

impl From<inquire::InquireError> for DeployError {
    fn from(err: inquire::InquireError) -> Self {
        DeployError::ConfirmationFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_code() {
        let err = DeployError::UnknownOperator {
            name: "ibm-foo".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("cp4i::selection::unknown_operator".to_string())
        );
    }

    #[test]
    fn test_exit_codes() {
        let invalid = DeployError::InvalidArguments {
            message: "bad".to_string(),
        };
        assert_eq!(invalid.exit_code(), 2);

        let resolution = DeployError::ResolutionFailed {
            version: "16.1.0".to_string(),
            cause: "boom".to_string(),
        };
        assert_eq!(resolution.exit_code(), 1);
    }

    #[test]
    fn test_preflight_help_is_exposed() {
        let err = preflight_failed("oc is not logged-in", Some("Run 'oc login' first"));
        assert_eq!(
            err.help().map(|h| h.to_string()),
            Some("Run 'oc login' first".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DeployError = io_err.into();
        assert!(matches!(err, DeployError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: DeployError = parse_result.unwrap_err().into();
        assert!(matches!(err, DeployError::MetadataParseFailed { .. }));
    }

    test_error_contains!(
        test_unknown_operator_message,
        DeployError::UnknownOperator {
            name: "ibm-foo".to_string()
        },
        "ibm-foo",
        "not a valid operator name"
    );

    test_error_contains!(
        test_resolution_message_carries_version,
        DeployError::ResolutionFailed {
            version: "2099.1".to_string(),
            cause: "unknown".to_string()
        },
        "2099.1",
        "unknown"
    );

    test_error_contains!(
        test_read_failure_keeps_os_reason,
        fs::read_failed(
            std::path::Path::new("/tmp/catalog-sources.yaml"),
            "Permission denied (os error 13)"
        ),
        "/tmp/catalog-sources.yaml",
        "Permission denied"
    );

    test_error_contains!(
        test_write_failure_keeps_os_reason,
        file_write_failed(
            std::path::Path::new("/tmp/subscription-ibm-mq.yaml"),
            "No space left on device"
        ),
        "/tmp/subscription-ibm-mq.yaml",
        "No space left on device"
    );

    test_error_contains!(
        test_missing_channel_message,
        DeployError::MissingChannel {
            literal_name: "ibm-mq".to_string()
        },
        "ibm-mq",
        "channel"
    );
}
