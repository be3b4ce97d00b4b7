//! Confirmation gates for apply plans
//!
//! The plan is printed before the gate is asked, so gates only decide.

use inquire::{Confirm, InquireError};

use super::ApplyPlan;
use crate::error::{DeployError, Result};

/// Outcome of asking a gate about a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Skip,
}

/// Decides whether a planned batch may touch the cluster
pub trait ConfirmationGate {
    fn confirm(&self, plan: &ApplyPlan) -> Result<Decision>;
}

/// Interactive terminal prompt
#[derive(Debug, Default)]
pub struct PromptGate;

impl ConfirmationGate for PromptGate {
    fn confirm(&self, plan: &ApplyPlan) -> Result<Decision> {
        let answer = Confirm::new(&format!("Apply these {} change(s)?", plan.actions().len()))
            .with_default(false)
            .with_help_message("'y' to apply, 'n' to continue without applying, Ctrl-C to abort")
            .prompt();

        match answer {
            Ok(true) => Ok(Decision::Proceed),
            Ok(false) | Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Ok(Decision::Skip)
            }
            Err(e) => Err(DeployError::ConfirmationFailed {
                message: format!("{e} (use --non-interactive when no terminal is attached)"),
            }),
        }
    }
}

/// Gate used with `--non-interactive`: always proceeds
#[derive(Debug, Default)]
pub struct AutoApprove;

impl ConfirmationGate for AutoApprove {
    fn confirm(&self, _plan: &ApplyPlan) -> Result<Decision> {
        Ok(Decision::Proceed)
    }
}
