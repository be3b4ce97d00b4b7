//! Install policy tables
//!
//! Everything the pipeline treats as policy rather than algorithm lives here:
//! which operators bundle which, which subscriptions are applied last, the
//! fallback catalog source and the settle delay. Defaults are built in and can be
//! overridden by a YAML file passed with `--policy`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DeployError, Result};

/// Catalog source used for any operator without an individually mirrored one
pub const DEFAULT_FALLBACK_CATALOG_SOURCE: &str = "ibm-operator-catalog";

/// File-name prefix of catalog-source manifests produced by the packaging tool
pub const DEFAULT_CATALOG_SOURCE_PREFIX: &str = "catalog-sources";

const DEFAULT_SETTLE_SECONDS: u64 = 30;

/// "A bundles B": when `bundler` is selected, `bundled` is dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExclusionRule {
    pub bundler: String,
    pub bundled: String,
}

impl ExclusionRule {
    pub fn new(bundler: &str, bundled: &str) -> Self {
        Self {
            bundler: bundler.to_string(),
            bundled: bundled.to_string(),
        }
    }
}

/// Policy tables consulted by the selection, binding and apply stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Policy {
    /// Mutual exclusion rules between co-installed operators
    pub exclusions: Vec<ExclusionRule>,
    /// Literal names whose subscriptions are applied after all others
    pub fragile: Vec<String>,
    /// Catalog source bound when no discovered one matches an operator
    pub fallback_catalog_source: String,
    /// Wait after namespace creation, catalog sources and each subscription
    pub settle_seconds: u64,
    /// File-name prefix identifying catalog-source manifests
    pub catalog_source_prefix: String,
    /// Vendor prefix stripped from package ids when deriving search tokens
    pub vendor_prefix: String,
    /// Role suffix stripped from package ids when deriving search tokens
    pub role_suffix: String,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            exclusions: vec![
                // datapower comes with ibm-apiconnect and fails when both are subscribed
                ExclusionRule::new("ibm-apiconnect", "datapower-operator"),
                ExclusionRule::new("ibm-eventstreams", "ibm-eem-operator"),
            ],
            fragile: vec![
                "ibm-integration-platform-navigator".to_string(),
                "ibm-apiconnect".to_string(),
            ],
            fallback_catalog_source: DEFAULT_FALLBACK_CATALOG_SOURCE.to_string(),
            settle_seconds: DEFAULT_SETTLE_SECONDS,
            catalog_source_prefix: DEFAULT_CATALOG_SOURCE_PREFIX.to_string(),
            vendor_prefix: "ibm-".to_string(),
            role_suffix: "-operator".to_string(),
        }
    }
}

impl Policy {
    /// Parse a policy from YAML; missing keys keep their defaults
    ///
    /// Exclusion rules must not form a cycle: with `a` bundling `b` and `b`
    /// bundling `a`, requesting both would install neither.
    pub fn from_yaml(origin: &str, yaml: &str) -> Result<Self> {
        let policy: Self = serde_yaml::from_str(yaml).map_err(|e| DeployError::PolicyLoadFailed {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(cycle) = exclusion_cycle(&policy.exclusions) {
            return Err(DeployError::PolicyLoadFailed {
                path: origin.to_string(),
                reason: format!("exclusion rules form a cycle: {}", cycle.join(" -> ")),
            });
        }
        Ok(policy)
    }

    /// Load a policy file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DeployError::PolicyLoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&path.display().to_string(), &content)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_seconds)
    }

    pub fn is_fragile(&self, literal_name: &str) -> bool {
        self.fragile.iter().any(|f| f == literal_name)
    }
}

/// Names along the first bundling cycle, starting and ending at the same operator
fn exclusion_cycle(rules: &[ExclusionRule]) -> Option<Vec<String>> {
    let mut edges: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for rule in rules {
        edges
            .entry(rule.bundler.as_str())
            .or_default()
            .push(rule.bundled.as_str());
    }

    let mut done = BTreeSet::new();
    for &start in edges.keys() {
        let mut path = Vec::new();
        if let Some(cycle) = walk(start, &edges, &mut path, &mut done) {
            return Some(cycle);
        }
    }
    None
}

fn walk<'a>(
    node: &'a str,
    edges: &BTreeMap<&'a str, Vec<&'a str>>,
    path: &mut Vec<&'a str>,
    done: &mut BTreeSet<&'a str>,
) -> Option<Vec<String>> {
    if let Some(pos) = path.iter().position(|seen| *seen == node) {
        let mut cycle: Vec<String> = path[pos..].iter().map(|n| (*n).to_string()).collect();
        cycle.push(node.to_string());
        return Some(cycle);
    }
    if done.contains(node) {
        return None;
    }

    path.push(node);
    for &next in edges.get(node).into_iter().flatten() {
        if let Some(cycle) = walk(next, edges, path, done) {
            return Some(cycle);
        }
    }
    path.pop();
    done.insert(node);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_tables() {
        let policy = Policy::default();
        assert!(
            policy
                .exclusions
                .contains(&ExclusionRule::new("ibm-apiconnect", "datapower-operator"))
        );
        assert_eq!(policy.fallback_catalog_source, "ibm-operator-catalog");
        assert_eq!(policy.settle_delay(), Duration::from_secs(30));
        assert!(policy.is_fragile("ibm-apiconnect"));
        assert!(!policy.is_fragile("ibm-mq"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let policy = Policy::from_yaml("policy.yaml", "settle-seconds: 0\nfragile: [ibm-mq]\n").unwrap();
        assert_eq!(policy.settle_seconds, 0);
        assert_eq!(policy.fragile, vec!["ibm-mq".to_string()]);
        assert_eq!(policy.exclusions, Policy::default().exclusions);
        assert_eq!(policy.vendor_prefix, "ibm-");
    }

    #[test]
    fn test_exclusions_from_yaml() {
        let yaml = "exclusions:\n  - bundler: a\n    bundled: b\n";
        let policy = Policy::from_yaml("policy.yaml", yaml).unwrap();
        assert_eq!(policy.exclusions, vec![ExclusionRule::new("a", "b")]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Policy::from_yaml("policy.yaml", "settle: 3\n").unwrap_err();
        assert!(matches!(err, DeployError::PolicyLoadFailed { .. }));
    }

    #[test]
    fn test_cyclic_exclusions_are_rejected() {
        let yaml = "exclusions:
  - bundler: a
    bundled: b
  - bundler: b
    bundled: a
";
        let err = Policy::from_yaml("policy.yaml", yaml).unwrap_err();
        match err {
            DeployError::PolicyLoadFailed { path, reason } => {
                assert_eq!(path, "policy.yaml");
                assert!(reason.contains("a -> b -> a"), "got: {reason}");
            }
            other => panic!("Expected PolicyLoadFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_self_exclusion_is_a_cycle() {
        let rules = vec![ExclusionRule::new("ibm-mq", "ibm-mq")];
        assert_eq!(
            exclusion_cycle(&rules),
            Some(vec!["ibm-mq".to_string(), "ibm-mq".to_string()])
        );
    }

    #[test]
    fn test_chains_and_shared_targets_are_not_cycles() {
        let rules = vec![
            ExclusionRule::new("a", "b"),
            ExclusionRule::new("b", "c"),
            ExclusionRule::new("a", "c"),
            ExclusionRule::new("d", "c"),
        ];
        assert_eq!(exclusion_cycle(&rules), None);
        assert_eq!(exclusion_cycle(&Policy::default().exclusions), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Policy::load(Path::new("/nonexistent/policy.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/policy.yaml"));
    }
}
