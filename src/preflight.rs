//! Checks run before anything is downloaded or applied

use std::path::Path;

use crate::apply::ClusterClient;
use crate::error::{Result, preflight_failed};
use crate::fetcher::ibm_pak;
use crate::ui::Output;

/// Verify the cluster client and the packaging tool are usable
///
/// Stops at the first failing check.
pub fn check(cluster: &dyn ClusterClient, ibm_pak_binary: &Path, output: &Output) -> Result<()> {
    if !cluster.is_installed() {
        return Err(preflight_failed(
            "oc is not installed or not on PATH",
            Some("Install the OpenShift CLI or point --oc at the binary"),
        ));
    }
    output.detail("oc is installed");

    if !cluster.is_logged_in() {
        return Err(preflight_failed(
            "not logged in to an OpenShift cluster",
            Some("Run 'oc login' first"),
        ));
    }
    output.detail("oc is logged in");

    if !ibm_pak_binary.is_file() {
        let hint = format!(
            "Download the ibm-pak plugin from {} and pass its path with --ibm-pak",
            ibm_pak::release_url()
        );
        return Err(preflight_failed(
            format!("ibm-pak plugin not found at {}", ibm_pak_binary.display()),
            Some(&hint),
        ));
    }
    output.detail(format!("ibm-pak found at {}", ibm_pak_binary.display()));

    Ok(())
}
