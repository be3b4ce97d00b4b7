//! Cluster client
//!
//! The [`ClusterClient`] trait is everything the pipeline needs from the cluster;
//! [`Oc`] implements it with the `oc` CLI.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{DeployError, Result};
use crate::ui::Output;

/// Operations the pipeline performs against the cluster
pub trait ClusterClient {
    /// Whether the client binary can be run at all
    fn is_installed(&self) -> bool;

    /// Whether the client is logged in to a reachable cluster
    fn is_logged_in(&self) -> bool;

    fn namespace_exists(&self, namespace: &str) -> bool;

    /// Create a namespace; returns the client's exit code
    fn create_namespace(&self, namespace: &str) -> Result<i32>;

    /// Apply a manifest file into `namespace`; returns the client's exit code
    fn apply(&self, namespace: &str, file: &Path) -> Result<i32>;
}

/// `oc` command line client
#[derive(Debug, Clone)]
pub struct Oc {
    binary: PathBuf,
    output: Output,
}

impl Oc {
    pub fn new(binary: &Path, output: Output) -> Self {
        Self {
            binary: binary.to_path_buf(),
            output,
        }
    }

    fn quiet_success(&self, args: &[&str]) -> bool {
        Command::new(&self.binary)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    fn run(&self, args: &[&str]) -> Result<i32> {
        self.output
            .detail(format!("{} {}", self.binary.display(), args.join(" ")));

        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .map_err(|e| DeployError::ApplyActionFailed {
                action: args.join(" "),
                reason: format!("failed to run {}: {e}", self.binary.display()),
            })?;

        Ok(status.code().unwrap_or(-1))
    }
}

impl ClusterClient for Oc {
    fn is_installed(&self) -> bool {
        self.quiet_success(&["version", "--client"])
    }

    fn is_logged_in(&self) -> bool {
        self.quiet_success(&["cluster-info"])
    }

    fn namespace_exists(&self, namespace: &str) -> bool {
        self.quiet_success(&["get", "ns", namespace])
    }

    fn create_namespace(&self, namespace: &str) -> Result<i32> {
        self.run(&["new-project", namespace])
    }

    fn apply(&self, namespace: &str, file: &Path) -> Result<i32> {
        let file = file.to_string_lossy();
        self.run(&["apply", "-n", namespace, "-f", &file])
    }
}
