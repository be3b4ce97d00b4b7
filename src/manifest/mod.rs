//! Subscription and OperatorGroup manifests
//!
//! Generation is pure: it returns the text and the file it belongs in. Files are
//! written by the apply plan once the user has confirmed it.

use std::path::{Path, PathBuf};

use crate::domain::OperatorRecord;
use crate::error::{DeployError, Result};

/// Name of the OperatorGroup created for a single target namespace
pub const OPERATOR_GROUP_NAME: &str = "ibm-integration-operatorgroup";

/// A rendered manifest and its destination file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub path: PathBuf,
    pub content: String,
}

/// Render the Subscription for `record`
///
/// Fails with [`DeployError::MissingChannel`] when the record has no channel. A
/// record that was never bound uses `fallback_catalog_source`.
pub fn generate(
    record: &OperatorRecord,
    catalog_namespace: &str,
    fallback_catalog_source: &str,
    manifest_dir: &Path,
) -> Result<Manifest> {
    let channel = record
        .channel()
        .ok_or_else(|| DeployError::MissingChannel {
            literal_name: record.literal_name().to_string(),
        })?;
    let source = record
        .catalog_source_name
        .as_deref()
        .unwrap_or(fallback_catalog_source);
    let name = record.literal_name();

    let content = format!(
        "apiVersion: operators.coreos.com/v1alpha1
kind: Subscription
metadata:
  name: {name}
spec:
  channel: {channel}
  name: {name}
  source: {source}
  sourceNamespace: {catalog_namespace}
"
    );

    Ok(Manifest {
        path: manifest_dir.join(format!("subscription-{name}.yaml")),
        content,
    })
}

/// Render the OperatorGroup scoping subscriptions to `target_namespace`
pub fn generate_operator_group(target_namespace: &str, manifest_dir: &Path) -> Manifest {
    let content = format!(
        "apiVersion: operators.coreos.com/v1
kind: OperatorGroup
metadata:
  name: {OPERATOR_GROUP_NAME}
  namespace: {target_namespace}
spec:
  targetNamespaces:
  - {target_namespace}
"
    );

    Manifest {
        path: manifest_dir.join(format!("operatorgroup-{target_namespace}.yaml")),
        content,
    }
}
