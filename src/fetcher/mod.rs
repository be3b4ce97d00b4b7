//! CASE artifact fetching
//!
//! This module handles:
//! - Clearing the download directory at the start of a run
//! - Invoking the packaging tool once per operator, sequentially
//! - Collecting the catalog-source files each operator's CASE produced
//!
//! A packaging tool failure is never fatal: some CASEs exit non-zero on benign
//! warnings, so the operator keeps whatever artifacts were produced.

pub mod ibm_pak;

pub use ibm_pak::IbmPak;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::domain::OperatorSet;
use crate::error::{DeployError, Result};
use crate::ui::{Output, ProgressReporter};

/// Subdirectory of the download directory holding per-CASE mirror manifests
const MIRROR_DIR: [&str; 2] = ["data", "mirror"];

/// External program that downloads a CASE into the download directory
pub trait PackagingTool {
    /// Fetch `package_id` at `version`; returns the tool's exit code
    fn fetch(&self, package_id: &str, version: &str) -> Result<i32>;
}

/// Per-run fetch outcome
#[derive(Debug, Default)]
pub struct FetchSummary {
    /// Literal names whose packaging tool run failed or exited non-zero
    pub failed: Vec<String>,
}

/// Runs the packaging tool for each selected operator
pub struct ArtifactFetcher<'a> {
    tool: &'a dyn PackagingTool,
    download_dir: PathBuf,
    catalog_source_prefix: String,
    output: Output,
}

impl<'a> ArtifactFetcher<'a> {
    pub fn new(
        tool: &'a dyn PackagingTool,
        download_dir: &Path,
        catalog_source_prefix: &str,
        output: Output,
    ) -> Self {
        Self {
            tool,
            download_dir: download_dir.to_path_buf(),
            catalog_source_prefix: catalog_source_prefix.to_string(),
            output,
        }
    }

    /// Fetch every record in set order and fill in its `artifact_paths`
    ///
    /// Only failing to reset the download directory is an error.
    pub fn fetch(
        &self,
        records: &mut OperatorSet,
        progress: &mut dyn ProgressReporter,
    ) -> Result<FetchSummary> {
        self.output.status(format!(
            "Removing {} folder...",
            self.download_dir.display()
        ));
        if let Err(e) = reset_dir(&self.download_dir) {
            progress.abandon();
            return Err(e);
        }

        let total = records.len();
        let mut summary = FetchSummary::default();

        // Lines printed while the bar is drawn go through `progress.suspend`
        for (index, record) in records.iter_mut().enumerate() {
            progress.update_operator(record.literal_name(), index + 1, total);
            let downloading = format!(
                "Downloading {} ({} {})",
                record.literal_name(),
                record.package_id(),
                record.package_version()
            );
            progress.suspend(&mut || self.output.detail(&downloading));

            let problem = match self
                .tool
                .fetch(record.package_id(), record.package_version())
            {
                Ok(0) => None,
                Ok(code) => Some(format!(
                    "Packaging tool exited with {code} for {}, continuing with downloaded files",
                    record.literal_name()
                )),
                Err(e) => Some(format!("{e}, continuing")),
            };
            if let Some(problem) = problem {
                progress.suspend(&mut || self.output.warn(&problem));
                summary.failed.push(record.literal_name().to_string());
            }

            record.artifact_paths = scan_catalog_sources(
                &self.download_dir,
                record.package_id(),
                &self.catalog_source_prefix,
            );
            for path in &record.artifact_paths {
                let found = format!("  found catalog source {}", path.display());
                progress.suspend(&mut || self.output.detail(&found));
            }
            progress.inc_operator();
        }

        progress.finish();
        Ok(summary)
    }
}

/// Remove `dir` recursively if present, then recreate it empty
pub fn reset_dir(dir: &Path) -> Result<()> {
    let fail = |e: std::io::Error| DeployError::DownloadDirFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    };

    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(fail)?;
    }
    std::fs::create_dir_all(dir).map_err(fail)
}

/// Catalog-source files below `<download_dir>/data/mirror/<package_id>`, sorted by path
pub fn scan_catalog_sources(download_dir: &Path, package_id: &str, prefix: &str) -> Vec<PathBuf> {
    let mut root = download_dir.to_path_buf();
    root.extend(MIRROR_DIR);
    root.push(package_id);

    if !root.is_dir() {
        return Vec::new();
    }

    let pattern = format!("{prefix}*");
    let glob = Glob::new(&pattern).ok();

    WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            match &glob {
                Some(glob) => glob.matched(&CandidatePath::from(&*name)).is_some(),
                None => name.starts_with(prefix),
            }
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}
