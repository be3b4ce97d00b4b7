//! ibm-pak packaging tool
//!
//! Runs `oc-ibm_pak get` followed by `oc-ibm_pak generate mirror-manifests` for a
//! CASE, with `IBMPAK_HOME` set so the download lands in `<home>/.ibm-pak`.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::PackagingTool;
use crate::error::{DeployError, Result};
use crate::ui::Output;

/// Registry the mirror manifests are generated for
const TARGET_REGISTRY: &str = "icr.io";

/// Release of the plugin preflight points users at when it is missing
pub const IBM_PAK_RELEASE: &str = "v1.18.1";

/// The `oc-ibm_pak` plugin binary
#[derive(Debug, Clone)]
pub struct IbmPak {
    binary: PathBuf,
    home: PathBuf,
    output: Output,
}

impl IbmPak {
    pub fn new(binary: &Path, home: &Path, output: Output) -> Self {
        Self {
            binary: binary.to_path_buf(),
            home: home.to_path_buf(),
            output,
        }
    }

    fn run(&self, package_id: &str, version: &str, args: &[&str]) -> Result<i32> {
        self.output.detail(format!(
            "IBMPAK_HOME={} {} {}",
            self.home.display(),
            self.binary.display(),
            args.join(" ")
        ));

        let output = Command::new(&self.binary)
            .args(args)
            .env("IBMPAK_HOME", &self.home)
            .output()
            .map_err(|e| DeployError::PackagingToolFailed {
                package: package_id.to_string(),
                version: version.to_string(),
                reason: format!("failed to run {}: {e}", self.binary.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            self.output.detail(stderr.trim());
        }

        Ok(output.status.code().unwrap_or(-1))
    }
}

impl PackagingTool for IbmPak {
    fn fetch(&self, package_id: &str, version: &str) -> Result<i32> {
        let code = self.run(package_id, version, &["get", package_id, "--version", version])?;
        if code != 0 {
            return Ok(code);
        }

        self.run(
            package_id,
            version,
            &[
                "generate",
                "mirror-manifests",
                package_id,
                TARGET_REGISTRY,
                "--version",
                version,
            ],
        )
    }
}

/// Download URL of the plugin for the host OS and architecture
pub fn release_url() -> String {
    let os = std::env::consts::OS;
    let arch = match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        other => other,
    };
    format!(
        "https://github.com/IBM/ibm-pak/releases/download/{IBM_PAK_RELEASE}/oc-ibm_pak-{os}-{arch}.tar.gz"
    )
}
