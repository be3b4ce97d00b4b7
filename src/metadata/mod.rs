//! Operator metadata resolution
//!
//! This module handles:
//! - The [`MetadataProvider`] seam: anything that can list the operators of a release
//! - [`resolve`]: turning provider entries into a unique, non-empty set of
//!   [`OperatorMetadata`], dropping entries that cannot identify an operator
//!
//! The bundled YAML catalog lives in [`catalog`].

pub mod catalog;

pub use catalog::CatalogFile;

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::OperatorMetadata;
use crate::error::{DeployError, Result};

/// Raw operator entry as a provider reports it
///
/// Every field is optional so one malformed entry never poisons a release;
/// [`resolve`] decides which entries are usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MetadataEntry {
    pub friendly_name: Option<String>,
    /// Operator package name (literal name)
    pub name: Option<String>,
    /// CASE name passed to the packaging tool
    pub package: Option<String>,
    pub package_version: Option<String>,
    pub channel: Option<String>,
}

/// Source of operator metadata for a release version
pub trait MetadataProvider {
    /// Entries for `version`, or an error if the version is unknown or the
    /// source cannot be read
    fn entries(&self, version: &str) -> Result<Vec<MetadataEntry>>;
}

/// Operators resolved for one release
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    pub version: String,
    /// Operators in source order, literal names unique
    pub operators: Vec<OperatorMetadata>,
    /// Entries dropped because they were incomplete or duplicated
    pub dropped: usize,
}

/// Resolve the operators of `version` through `provider`
///
/// Provider failures become a single [`DeployError::ResolutionFailed`] carrying
/// the version and the underlying cause. An empty result is an error too.
pub fn resolve(provider: &dyn MetadataProvider, version: &str) -> Result<ResolvedCatalog> {
    let entries = provider
        .entries(version)
        .map_err(|e| DeployError::ResolutionFailed {
            version: version.to_string(),
            cause: e.to_string(),
        })?;

    let total = entries.len();
    let mut seen = HashSet::new();
    let operators: Vec<OperatorMetadata> = entries
        .into_iter()
        .filter_map(promote)
        .filter(|op| seen.insert(op.literal_name.clone()))
        .collect();

    if operators.is_empty() {
        return Err(DeployError::ResolutionFailed {
            version: version.to_string(),
            cause: format!("none of the {total} catalog entries describe an installable operator"),
        });
    }

    Ok(ResolvedCatalog {
        version: version.to_string(),
        dropped: total - operators.len(),
        operators,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Turn an entry into metadata; `None` when it lacks name, package or version
fn promote(entry: MetadataEntry) -> Option<OperatorMetadata> {
    let literal_name = non_blank(entry.name)?;
    let package_id = non_blank(entry.package)?;
    let package_version = non_blank(entry.package_version)?;

    Some(OperatorMetadata {
        friendly_name: non_blank(entry.friendly_name).unwrap_or_else(|| literal_name.clone()),
        literal_name,
        package_id,
        package_version,
        channel: non_blank(entry.channel),
    })
}
