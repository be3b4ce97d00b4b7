//! Validated settings for one deploy run

use std::path::PathBuf;

use crate::cli::DeployArgs;
use crate::config::{ALL_NAMESPACES, Policy};
use crate::error::{DeployError, Result};

/// Download directory name the packaging tool creates under its home
pub const DOWNLOAD_DIR_NAME: &str = ".ibm-pak";

/// Settings of one `deploy` invocation after flag validation
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub version: String,
    pub selection: Vec<String>,
    pub target_namespace: String,
    pub catalog_namespace: String,
    pub list_only: bool,
    pub json: bool,
    pub non_interactive: bool,
    pub metadata: Option<PathBuf>,
    pub pak_home: PathBuf,
    pub manifest_dir: PathBuf,
    pub ibm_pak: PathBuf,
    pub oc: PathBuf,
    pub policy: Policy,
    pub verbose: bool,
}

impl DeployConfig {
    /// Validate the flag combination and load the policy file, if any
    pub fn from_args(args: DeployArgs, verbose: bool) -> Result<Self> {
        if args.version.trim().is_empty() {
            return Err(DeployError::InvalidArguments {
                message: "--version must not be empty".to_string(),
            });
        }

        if args.json && !args.list {
            return Err(DeployError::InvalidArguments {
                message: "--json can only be used together with --list".to_string(),
            });
        }

        let catalog_namespace = if args.namespaced {
            args.target_namespace.clone()
        } else {
            args.catalog_namespace
        };

        if catalog_namespace == ALL_NAMESPACES {
            return Err(DeployError::InvalidArguments {
                message: format!(
                    "catalog sources cannot be applied to {ALL_NAMESPACES}; \
                     you specified --namespaced but did not specify --target-namespace"
                ),
            });
        }

        let policy = match &args.policy {
            Some(path) => Policy::load(path)?,
            None => Policy::default(),
        };

        Ok(Self {
            version: args.version.trim().to_string(),
            selection: args.operator,
            target_namespace: args.target_namespace,
            catalog_namespace,
            list_only: args.list,
            json: args.json,
            non_interactive: args.non_interactive,
            metadata: args.metadata,
            pak_home: args.pak_home,
            manifest_dir: args.manifest_dir,
            ibm_pak: args.ibm_pak,
            oc: args.oc,
            policy,
            verbose,
        })
    }

    /// Directory the packaging tool downloads into; cleared at the start of a run
    pub fn download_dir(&self) -> PathBuf {
        self.pak_home.join(DOWNLOAD_DIR_NAME)
    }

    /// Whether an OperatorGroup must be created for the target namespace
    pub fn needs_operator_group(&self) -> bool {
        self.target_namespace != ALL_NAMESPACES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use serial_test::serial;

    fn args(extra: &[&str]) -> DeployArgs {
        let mut full = vec!["cp4i-deploy", "deploy", "-v", "16.1.0"];
        full.extend_from_slice(extra);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Deploy(args) => args,
            _ => panic!("Expected Deploy command"),
        }
    }

    #[test]
    #[serial]
    fn test_defaults_are_valid() {
        let config = DeployConfig::from_args(args(&[]), false).unwrap();
        assert_eq!(config.catalog_namespace, "openshift-marketplace");
        assert_eq!(config.target_namespace, "openshift-operators");
        assert!(!config.needs_operator_group());
        assert_eq!(config.download_dir(), PathBuf::from("./.ibm-pak"));
    }

    #[test]
    fn test_namespaced_without_target_is_rejected() {
        let err = DeployConfig::from_args(args(&["--namespaced"]), false).unwrap_err();
        assert!(matches!(err, DeployError::InvalidArguments { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_namespaced_uses_target_namespace() {
        let config =
            DeployConfig::from_args(args(&["--namespaced", "--target-namespace", "cp4i"]), false)
                .unwrap();
        assert_eq!(config.catalog_namespace, "cp4i");
        assert!(config.needs_operator_group());
    }

    #[test]
    fn test_catalog_namespace_all_namespaces_is_rejected() {
        let err = DeployConfig::from_args(
            args(&["--catalog-namespace", "openshift-operators"]),
            false,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_json_requires_list() {
        let err = DeployConfig::from_args(args(&["--json"]), false).unwrap_err();
        assert!(matches!(err, DeployError::InvalidArguments { .. }));
        assert!(DeployConfig::from_args(args(&["--json", "--list"]), false).is_ok());
    }

    #[test]
    fn test_policy_file_is_loaded() {
        let temp = crate::test_fixtures::create_temp_dir();
        let policy_path = temp.path().join("policy.yaml");
        std::fs::write(&policy_path, "settle-seconds: 0\n").unwrap();

        let config = DeployConfig::from_args(
            args(&["--policy", policy_path.to_str().unwrap()]),
            false,
        )
        .unwrap();
        assert_eq!(config.policy.settle_seconds, 0);
    }
}
