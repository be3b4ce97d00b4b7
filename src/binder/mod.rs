//! Catalog-source binding
//!
//! Two passes over the catalog-source files of all operators, pooled:
//! 1. sanitize each file in place, dropping `namespace:` lines, and collect the
//!    declared `name:` values as candidate catalog-source names
//! 2. bind each operator to the first candidate containing one of the search
//!    tokens derived from its package id, or to the fallback catalog source
//!
//! Matching is first-substring-match in discovery order. An unrelated catalog
//! source that happens to contain a token wins if it was discovered first.

use std::path::Path;

use crate::config::Policy;
use crate::domain::OperatorSet;
use crate::error::{Result, fs as fs_error};
use crate::ui::Output;

const NAMESPACE_KEY: &str = "namespace:";
const NAME_KEY: &str = "name:";

/// Result of sanitizing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    /// Declared names, in file order
    pub names: Vec<String>,
    /// Whether the file was rewritten
    pub changed: bool,
}

/// Strip namespace lines from a catalog-source manifest and collect its names
///
/// The file is only rewritten when a namespace line was present, so running it
/// twice leaves the file untouched the second time.
pub fn sanitize_file(path: &Path) -> Result<Sanitized> {
    let content = std::fs::read_to_string(path).map_err(|e| fs_error::read_failed(path, e))?;
    let (sanitized, names) = sanitize_content(&content);

    let changed = sanitized != content;
    if changed {
        std::fs::write(path, &sanitized).map_err(|e| fs_error::write_failed(path, e))?;
    }

    Ok(Sanitized { names, changed })
}

/// Pure part of [`sanitize_file`]
pub fn sanitize_content(content: &str) -> (String, Vec<String>) {
    let mut kept = String::with_capacity(content.len());
    let mut names = Vec::new();

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(NAMESPACE_KEY) {
            continue;
        }
        if let Some(value) = trimmed.strip_prefix(NAME_KEY) {
            let value = value.trim();
            if !value.is_empty() {
                names.push(value.to_string());
            }
        }
        kept.push_str(line);
    }

    (kept, names)
}

/// Search tokens for a package id: vendor prefix and role suffix stripped, then
/// split on `-`, empty tokens dropped
pub fn search_tokens(package_id: &str, policy: &Policy) -> Vec<String> {
    let stem = package_id
        .strip_prefix(policy.vendor_prefix.as_str())
        .unwrap_or(package_id);
    let stem = stem
        .strip_suffix(policy.role_suffix.as_str())
        .unwrap_or(stem);

    stem.split('-')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// First candidate containing any of `tokens`
pub fn first_match<'c>(candidates: &'c [String], tokens: &[String]) -> Option<&'c str> {
    candidates
        .iter()
        .find(|candidate| tokens.iter().any(|token| candidate.contains(token.as_str())))
        .map(String::as_str)
}

/// Sanitize every record's catalog-source files and bind each record
///
/// Never fails: unreadable files are reported and skipped, and unmatched
/// operators get the fallback catalog source. Returns the pooled candidates.
pub fn bind(records: &mut OperatorSet, policy: &Policy, output: &Output) -> Vec<String> {
    let mut candidates = Vec::new();

    for record in records.iter() {
        for path in &record.artifact_paths {
            match sanitize_file(path) {
                Ok(sanitized) => {
                    if sanitized.changed {
                        output.status(format!(
                            "Stripped namespace from catalog-sources yaml file {}",
                            path.display()
                        ));
                    }
                    candidates.extend(sanitized.names);
                }
                Err(e) => output.warn(format!("Skipping catalog source file: {e}")),
            }
        }
    }

    for record in records.iter_mut() {
        let tokens = search_tokens(record.package_id(), policy);
        let bound = first_match(&candidates, &tokens)
            .unwrap_or(policy.fallback_catalog_source.as_str())
            .to_string();
        output.detail(format!(
            "{} -> catalog source {bound} (tokens: {})",
            record.literal_name(),
            tokens.join(", ")
        ));
        record.catalog_source_name = Some(bound);
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OperatorRecord;
    use crate::domain::operator::metadata;
    use crate::test_fixtures::create_temp_dir;

    const CATALOG_SOURCE: &str = "apiVersion: operators.coreos.com/v1alpha1
kind: CatalogSource
metadata:
  name: ibm-eventstreams-catalog
  namespace: openshift-marketplace
spec:
  displayName: ibm-eventstreams-3.5.0
  image: icr.io/cpopen/ibm-eventstreams-catalog@sha256:abc
  publisher: IBM
  sourceType: grpc
";

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn test_sanitize_content_strips_namespace_and_collects_names() {
        let (sanitized, names) = sanitize_content(CATALOG_SOURCE);
        assert!(!sanitized.contains("namespace:"));
        assert!(sanitized.contains("displayName: ibm-eventstreams-3.5.0"));
        assert_eq!(names, vec!["ibm-eventstreams-catalog"]);
    }

    #[test]
    fn test_sanitize_file_is_idempotent() {
        let temp = create_temp_dir();
        let path = temp.path().join("catalog-sources.yaml");
        std::fs::write(&path, CATALOG_SOURCE).unwrap();

        let first = sanitize_file(&path).unwrap();
        assert!(first.changed);
        let after_first = std::fs::read_to_string(&path).unwrap();

        let second = sanitize_file(&path).unwrap();
        assert!(!second.changed);
        assert_eq!(second.names, first.names);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn test_sanitize_handles_multiple_documents() {
        let content = format!("{CATALOG_SOURCE}---\nmetadata:\n  name: opencloud-operators\n  namespace: x\n");
        let (sanitized, names) = sanitize_content(&content);
        assert_eq!(names, vec!["ibm-eventstreams-catalog", "opencloud-operators"]);
        assert_eq!(sanitized.matches("namespace:").count(), 0);
    }

    #[test]
    fn test_search_tokens() {
        let policy = Policy::default();
        assert_eq!(search_tokens("ibm-eventstreams-operator", &policy), vec!["eventstreams"]);
        assert_eq!(
            search_tokens("ibm-integration-platform-navigator", &policy),
            vec!["integration", "platform", "navigator"]
        );
        assert_eq!(search_tokens("ibm-datapower-operator", &policy), vec!["datapower"]);
        assert_eq!(search_tokens("ibm-mq", &policy), vec!["mq"]);
        assert!(search_tokens("ibm--operator", &policy).is_empty());
    }

    #[test]
    fn test_first_match_prefers_discovery_order() {
        let pool = candidates(&["opencloud-operators", "ibm-eventstreams-catalog"]);
        let tokens = search_tokens("ibm-eventstreams-operator", &Policy::default());
        assert_eq!(first_match(&pool, &tokens), Some("ibm-eventstreams-catalog"));
    }

    #[test]
    fn test_first_match_is_substring_not_best_match() {
        // "mq" is a substring of an unrelated name discovered first
        let pool = candidates(&["ibm-mqtt-bridge-catalog", "ibm-mq-catalog"]);
        let tokens = search_tokens("ibm-mq", &Policy::default());
        assert_eq!(first_match(&pool, &tokens), Some("ibm-mqtt-bridge-catalog"));
    }

    #[test]
    fn test_bind_pools_candidates_across_records() {
        let temp = create_temp_dir();
        let es_file = temp.path().join("catalog-sources-es.yaml");
        let cs_file = temp.path().join("catalog-sources-cs.yaml");
        std::fs::write(&es_file, CATALOG_SOURCE).unwrap();
        std::fs::write(
            &cs_file,
            "metadata:\n  name: opencloud-operators\n  namespace: ibm-common-services\n",
        )
        .unwrap();

        let mut es = OperatorRecord::from(metadata("ibm-eventstreams", "ibm-eventstreams-operator"));
        es.artifact_paths = vec![cs_file.clone()];
        let mut other = OperatorRecord::from(metadata("ibm-foo", "ibm-foo-operator"));
        other.artifact_paths = vec![es_file.clone()];

        let mut set: OperatorSet = vec![es, other].into_iter().collect();
        let pool = bind(&mut set, &Policy::default(), &Output::default());

        assert_eq!(pool, vec!["opencloud-operators", "ibm-eventstreams-catalog"]);
        assert_eq!(
            set.get("ibm-eventstreams").unwrap().catalog_source_name.as_deref(),
            Some("ibm-eventstreams-catalog")
        );
        assert_eq!(
            set.get("ibm-foo").unwrap().catalog_source_name.as_deref(),
            Some("ibm-operator-catalog")
        );
        assert!(!std::fs::read_to_string(&cs_file).unwrap().contains("namespace:"));
    }

    #[test]
    fn test_bind_is_deterministic() {
        let pool = candidates(&["a-integration", "b-platform", "c-navigator"]);
        let tokens = search_tokens("ibm-integration-platform-navigator", &Policy::default());
        let first = first_match(&pool, &tokens);
        for _ in 0..10 {
            assert_eq!(first_match(&pool, &tokens), first);
        }
        assert_eq!(first, Some("a-integration"));
    }

    #[test]
    fn test_bind_skips_unreadable_files() {
        let mut record = OperatorRecord::from(metadata("ibm-mq", "ibm-mq"));
        record.artifact_paths = vec![std::path::PathBuf::from("/nonexistent/catalog-sources.yaml")];
        let mut set: OperatorSet = std::iter::once(record).collect();

        let pool = bind(&mut set, &Policy::default(), &Output::default());
        assert!(pool.is_empty());
        assert_eq!(
            set.get("ibm-mq").unwrap().catalog_source_name.as_deref(),
            Some("ibm-operator-catalog")
        );
    }
}
