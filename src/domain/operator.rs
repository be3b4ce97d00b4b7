//! Operator domain types
//!
//! `OperatorMetadata` is what the metadata catalog says about an operator for a
//! given release. `OperatorRecord` is the working copy the pipeline fills in as
//! artifacts are fetched and catalog sources are bound.

use std::path::PathBuf;

use serde::Serialize;

/// Resolved, immutable description of one operator in a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorMetadata {
    /// Display label, e.g. "IBM API Connect"
    pub friendly_name: String,
    /// Operator package name; identity key within a resolved set
    pub literal_name: String,
    /// Packaging tool identifier (CASE name)
    pub package_id: String,
    /// Packaging tool version (CASE version)
    pub package_version: String,
    /// Subscription channel, when the catalog declares one
    pub channel: Option<String>,
}

/// Pipeline working entity promoted from `OperatorMetadata`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorRecord {
    pub metadata: OperatorMetadata,
    /// Catalog source the subscription will point at; `None` until bound
    pub catalog_source_name: Option<String>,
    /// Catalog-source files found after fetching; empty until fetched
    pub artifact_paths: Vec<PathBuf>,
}

impl OperatorRecord {
    pub fn literal_name(&self) -> &str {
        &self.metadata.literal_name
    }

    pub fn package_id(&self) -> &str {
        &self.metadata.package_id
    }

    pub fn package_version(&self) -> &str {
        &self.metadata.package_version
    }

    pub fn channel(&self) -> Option<&str> {
        self.metadata.channel.as_deref()
    }
}

impl From<OperatorMetadata> for OperatorRecord {
    fn from(metadata: OperatorMetadata) -> Self {
        Self {
            metadata,
            catalog_source_name: None,
            artifact_paths: Vec::new(),
        }
    }
}

/// Insertion-ordered set of operator records keyed by literal name
///
/// Iteration order is the order records were inserted, which the selection
/// filter keeps equal to the order of the resolved catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorSet {
    records: Vec<OperatorRecord>,
}

impl OperatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Returns `false` and leaves the set untouched when a
    /// record with the same literal name is already present.
    pub fn insert(&mut self, record: OperatorRecord) -> bool {
        if self.contains(record.literal_name()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn contains(&self, literal_name: &str) -> bool {
        self.get(literal_name).is_some()
    }

    pub fn get(&self, literal_name: &str) -> Option<&OperatorRecord> {
        self.records
            .iter()
            .find(|r| r.literal_name() == literal_name)
    }

    /// Remove a record by literal name, keeping the order of the others
    pub fn remove(&mut self, literal_name: &str) -> Option<OperatorRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.literal_name() == literal_name)?;
        Some(self.records.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OperatorRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, OperatorRecord> {
        self.records.iter_mut()
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(OperatorRecord::literal_name).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a OperatorSet {
    type Item = &'a OperatorRecord;
    type IntoIter = std::slice::Iter<'a, OperatorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<OperatorRecord> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = OperatorRecord>>(iter: I) -> Self {
        let mut set = OperatorSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

#[cfg(test)]
pub(crate) fn metadata(literal_name: &str, package_id: &str) -> OperatorMetadata {
    OperatorMetadata {
        friendly_name: literal_name.to_string(),
        literal_name: literal_name.to_string(),
        package_id: package_id.to_string(),
        package_version: "1.0.0".to_string(),
        channel: Some("v1.0".to_string()),
    }
}
