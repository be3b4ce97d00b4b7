//! Apply planning and execution
//!
//! This module handles:
//! - Building the ordered list of cluster actions for a run ([`plan`])
//! - Moving fragile subscriptions to the end ([`fragile_last`])
//! - Gating the whole batch behind a [`ConfirmationGate`]
//! - Executing actions one at a time with settle delays, recording every outcome
//!
//! A plan moves `Planned -> Confirmed -> Applying -> Done`, or `Planned -> Aborted`
//! when the gate declines. Nothing is written to disk or the cluster before
//! `Confirmed`. Once applying, a failed action is recorded and the rest still run.

pub mod cluster;
pub mod confirmation;

pub use cluster::{ClusterClient, Oc};
pub use confirmation::{AutoApprove, ConfirmationGate, Decision, PromptGate};

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{ALL_NAMESPACES, Policy};
use crate::domain::{OperatorRecord, OperatorSet};
use crate::error::{DeployError, Result, apply_failed, file_write_failed};
use crate::manifest::{self, Manifest};
use crate::ui::Output;

/// One unit of cluster mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyAction {
    CreateNamespace(String),
    ApplyFile { namespace: String, path: PathBuf },
}

impl fmt::Display for ApplyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyAction::CreateNamespace(name) => write!(f, "oc new-project {name}"),
            ApplyAction::ApplyFile { namespace, path } => {
                write!(f, "oc apply -n {namespace} -f {}", path.display())
            }
        }
    }
}

/// Batch an action belongs to; decides where settle delays go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Namespaces,
    CatalogSources,
    OperatorGroup,
    Subscriptions,
}

impl Stage {
    fn settle_reason(self) -> &'static str {
        match self {
            Stage::Namespaces => "for the namespaces to settle",
            Stage::CatalogSources => "for the catalog sources to settle",
            Stage::OperatorGroup => "for the operator group to settle",
            Stage::Subscriptions => "for the subscription to settle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub stage: Stage,
    pub action: ApplyAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanState {
    Planned,
    Confirmed,
    Applying,
    Done,
    Aborted,
}

/// Result of one executed action
#[derive(Debug)]
pub struct ActionOutcome {
    pub action: ApplyAction,
    pub result: Result<()>,
}

/// What happened to a plan
#[derive(Debug)]
pub struct ApplyReport {
    pub state: PlanState,
    pub outcomes: Vec<ActionOutcome>,
}

impl ApplyReport {
    pub fn failures(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Inputs the planner needs besides the operator records
#[derive(Debug, Clone)]
pub struct PlanSettings<'a> {
    pub catalog_namespace: &'a str,
    pub target_namespace: &'a str,
    pub manifest_dir: &'a Path,
    pub policy: &'a Policy,
}

/// Ordered, gated batch of cluster actions
#[derive(Debug)]
pub struct ApplyPlan {
    actions: Vec<PlannedAction>,
    /// Files to write once the plan is confirmed
    manifests: Vec<Manifest>,
    settle: Duration,
    state: PlanState,
}

/// Build the apply plan for `records`
///
/// Returns the plan and the records whose subscription could not be generated;
/// those operators are left out of the plan.
pub fn plan(
    records: &OperatorSet,
    settings: &PlanSettings<'_>,
    cluster: &dyn ClusterClient,
) -> (ApplyPlan, Vec<DeployError>) {
    let mut actions = Vec::new();
    let mut manifests = Vec::new();
    let mut skipped = Vec::new();

    let mut seen = HashSet::new();
    for namespace in [settings.catalog_namespace, settings.target_namespace] {
        if seen.insert(namespace) && !cluster.namespace_exists(namespace) {
            actions.push(PlannedAction {
                stage: Stage::Namespaces,
                action: ApplyAction::CreateNamespace(namespace.to_string()),
            });
        }
    }

    for record in records {
        for path in &record.artifact_paths {
            actions.push(PlannedAction {
                stage: Stage::CatalogSources,
                action: ApplyAction::ApplyFile {
                    namespace: settings.catalog_namespace.to_string(),
                    path: path.clone(),
                },
            });
        }
    }

    if settings.target_namespace != ALL_NAMESPACES {
        let group = manifest::generate_operator_group(settings.target_namespace, settings.manifest_dir);
        actions.push(PlannedAction {
            stage: Stage::OperatorGroup,
            action: ApplyAction::ApplyFile {
                namespace: settings.target_namespace.to_string(),
                path: group.path.clone(),
            },
        });
        manifests.push(group);
    }

    let ordered = fragile_last(records.iter().collect(), |r: &&OperatorRecord| {
        settings.policy.is_fragile(r.literal_name())
    });
    for record in ordered {
        match manifest::generate(
            record,
            settings.catalog_namespace,
            &settings.policy.fallback_catalog_source,
            settings.manifest_dir,
        ) {
            Ok(subscription) => {
                actions.push(PlannedAction {
                    stage: Stage::Subscriptions,
                    action: ApplyAction::ApplyFile {
                        namespace: settings.target_namespace.to_string(),
                        path: subscription.path.clone(),
                    },
                });
                manifests.push(subscription);
            }
            Err(e) => skipped.push(e),
        }
    }

    let plan = ApplyPlan {
        actions,
        manifests,
        settle: settings.policy.settle_delay(),
        state: PlanState::Planned,
    };
    (plan, skipped)
}

/// Stable partition moving fragile items after all others
///
/// Both the non-fragile and the fragile items keep their relative order.
pub fn fragile_last<T>(items: Vec<T>, is_fragile: impl Fn(&T) -> bool) -> Vec<T> {
    let (fragile, mut ordered): (Vec<T>, Vec<T>) = items.into_iter().partition(|i| is_fragile(i));
    ordered.extend(fragile);
    ordered
}

impl ApplyPlan {
    pub fn actions(&self) -> &[PlannedAction] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Print the manifests and the actions that will run
    pub fn describe(&self, output: &Output) {
        for manifest in &self.manifests {
            output.status(format!("\n{} will be written: ", manifest.path.display()));
            output.block(&manifest.content);
        }

        output.heading("The following will now run...");
        for planned in &self.actions {
            output.action(planned.action.to_string());
        }
        output.blank();
    }

    /// Ask `gate` about the plan; moves to `Confirmed` or `Aborted`
    pub fn confirm(&mut self, gate: &dyn ConfirmationGate) -> Result<PlanState> {
        if self.state != PlanState::Planned {
            return Ok(self.state);
        }

        self.state = match gate.confirm(self)? {
            Decision::Proceed => PlanState::Confirmed,
            Decision::Skip => PlanState::Aborted,
        };
        Ok(self.state)
    }

    /// Write the manifests and run every action, in order
    ///
    /// A plan that was not confirmed is not executed and reports no outcomes.
    pub fn execute(mut self, cluster: &dyn ClusterClient, output: &Output) -> ApplyReport {
        if self.state != PlanState::Confirmed {
            return ApplyReport {
                state: self.state,
                outcomes: Vec::new(),
            };
        }
        self.state = PlanState::Applying;

        let mut unwritten = HashSet::new();
        for manifest in &self.manifests {
            let written = manifest
                .path
                .parent()
                .map_or(Ok(()), std::fs::create_dir_all)
                .and_then(|()| std::fs::write(&manifest.path, &manifest.content));
            if let Err(e) = written {
                output.error(format!("Failed to write {}: {e}", manifest.path.display()));
                unwritten.insert(manifest.path.clone());
            }
        }

        let mut outcomes = Vec::with_capacity(self.actions.len());
        for (index, planned) in self.actions.iter().enumerate() {
            output.action(planned.action.to_string());
            let result = run_action(&planned.action, cluster, &unwritten);
            if let Err(e) = &result {
                output.error(format!("{e}"));
            }
            outcomes.push(ActionOutcome {
                action: planned.action.clone(),
                result,
            });

            let next_stage = self.actions.get(index + 1).map(|next| next.stage);
            if Self::settles_after(planned.stage, next_stage) && !self.settle.is_zero() {
                output.status(format!(
                    "Sleeping {} seconds {}...",
                    self.settle.as_secs(),
                    planned.stage.settle_reason()
                ));
                std::thread::sleep(self.settle);
            }
        }

        self.state = PlanState::Done;
        ApplyReport {
            state: self.state,
            outcomes,
        }
    }

    /// Settle after the namespace and catalog-source batches, and after every subscription
    fn settles_after(stage: Stage, next: Option<Stage>) -> bool {
        match stage {
            Stage::Subscriptions => true,
            Stage::Namespaces | Stage::CatalogSources => next != Some(stage),
            Stage::OperatorGroup => false,
        }
    }
}

fn run_action(
    action: &ApplyAction,
    cluster: &dyn ClusterClient,
    unwritten: &HashSet<PathBuf>,
) -> Result<()> {
    let code = match action {
        ApplyAction::CreateNamespace(name) => cluster.create_namespace(name)?,
        ApplyAction::ApplyFile { namespace, path } => {
            if unwritten.contains(path) {
                return Err(file_write_failed(path, "manifest was not written"));
            }
            cluster.apply(namespace, path)?
        }
    };

    if code == 0 {
        Ok(())
    } else {
        Err(apply_failed(action, format!("exit code {code}")))
    }
}
