//! YAML metadata catalog
//!
//! Format:
//!
//! ```yaml
//! versions:
//!   "16.1.0":
//!     operators:
//!       - friendly-name: IBM MQ
//!         name: ibm-mq
//!         package: ibm-mq
//!         package-version: 3.2.4
//!         channel: v3.2
//! ```
//!
//! A catalog is bundled into the binary; `--metadata` points at another file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::{MetadataEntry, MetadataProvider};
use crate::error::{DeployError, Result};

const BUNDLED_CATALOG: &str = include_str!("catalog.yaml");

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    versions: BTreeMap<String, ReleaseEntry>,
}

#[derive(Debug, Deserialize)]
struct ReleaseEntry {
    #[serde(default)]
    operators: Vec<serde_yaml::Value>,
}

/// Metadata provider backed by a YAML catalog
#[derive(Debug)]
pub struct CatalogFile {
    /// Where the catalog came from, for error messages
    origin: String,
    versions: BTreeMap<String, ReleaseEntry>,
}

impl CatalogFile {
    /// Catalog compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_yaml("<bundled>", BUNDLED_CATALOG)
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DeployError::MetadataReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_yaml(&path.display().to_string(), &content)
    }

    pub fn from_yaml(origin: &str, yaml: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_yaml::from_str(yaml).map_err(|e| DeployError::MetadataParseFailed {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            origin: origin.to_string(),
            versions: document.versions,
        })
    }

    /// Release versions known to this catalog, sorted
    pub fn versions(&self) -> Vec<&str> {
        self.versions.keys().map(String::as_str).collect()
    }
}

impl MetadataProvider for CatalogFile {
    fn entries(&self, version: &str) -> Result<Vec<MetadataEntry>> {
        let release = self
            .versions
            .get(version)
            .ok_or_else(|| DeployError::UnknownVersion {
                version: version.to_string(),
                known: format!("{} in {}", self.versions().join(", "), self.origin),
            })?;

        // Entries that do not deserialize become empty entries; resolve() drops them
        Ok(release
            .operators
            .iter()
            .map(|value| serde_yaml::from_value(value.clone()).unwrap_or_default())
            .collect())
    }
}
