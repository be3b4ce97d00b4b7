//! Operator selection
//!
//! Narrows a resolved release to the operators the user asked for and then
//! applies the policy's exclusion rules ("A bundles B") to the result.

use crate::config::{ExclusionRule, SELECT_ALL};
use crate::domain::{OperatorMetadata, OperatorRecord, OperatorSet};
use crate::error::{DeployError, Result};

/// What the user asked to install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Named(Vec<String>),
}

impl Selection {
    /// Build from repeated `--operator` values; `all` anywhere selects everything
    pub fn from_names(names: &[String]) -> Self {
        if names.is_empty() || names.iter().any(|n| n == SELECT_ALL) {
            Selection::All
        } else {
            Selection::Named(names.to_vec())
        }
    }
}

/// Result of filtering: the records to install and the exclusions applied
#[derive(Debug, Clone)]
pub struct Filtered {
    pub operators: OperatorSet,
    pub excluded: Vec<ExclusionRule>,
}

/// Select operators from `all` and apply `rules`
///
/// Fails on the first requested name that is not in `all`; nothing is selected
/// in that case. Output order follows `all`, not the order of the request.
pub fn filter(
    all: &[OperatorMetadata],
    selection: &Selection,
    rules: &[ExclusionRule],
) -> Result<Filtered> {
    if let Selection::Named(names) = selection {
        if let Some(unknown) = names
            .iter()
            .find(|name| !all.iter().any(|op| &op.literal_name == *name))
        {
            return Err(DeployError::UnknownOperator {
                name: unknown.clone(),
            });
        }
    }

    let mut operators: OperatorSet = all
        .iter()
        .filter(|op| match selection {
            Selection::All => true,
            Selection::Named(names) => names.contains(&op.literal_name),
        })
        .cloned()
        .map(OperatorRecord::from)
        .collect();

    // Rules look at the selection as requested, so a chain A -> B -> C drops
    // both B and C regardless of rule order. Policy loading rejects cycles, so
    // the head of every chain stays selected.
    let applicable: Vec<&ExclusionRule> = rules
        .iter()
        .filter(|rule| operators.contains(&rule.bundler) && operators.contains(&rule.bundled))
        .collect();

    let mut excluded = Vec::new();
    for rule in applicable {
        if operators.remove(&rule.bundled).is_some() {
            excluded.push(rule.clone());
        }
    }

    Ok(Filtered {
        operators,
        excluded,
    })
}
