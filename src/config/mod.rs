//! Configuration for a deploy run
//!
//! This module contains:
//! - [`policy`]: exclusion, fragility and binding policy tables (YAML overridable)
//! - [`deploy`]: the validated settings of one `deploy` invocation

pub mod deploy;
pub mod policy;

pub use deploy::DeployConfig;
pub use policy::{ExclusionRule, Policy};

/// Target namespace meaning "all namespaces"; no OperatorGroup is needed there
pub const ALL_NAMESPACES: &str = "openshift-operators";

/// Default namespace for catalog sources
pub const MARKETPLACE_NAMESPACE: &str = "openshift-marketplace";

/// Selection sentinel meaning every resolved operator
pub const SELECT_ALL: &str = "all";
