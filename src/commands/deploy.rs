//! Deploy command implementation
//!
//! The deploy process:
//! 1. Validate flags and load the policy
//! 2. Resolve the operators of the requested release
//! 3. List them and stop (`--list`), or select the requested subset
//! 4. Preflight: oc installed and logged in, ibm-pak present
//! 5. Fetch CASE files and collect catalog-source files per operator
//! 6. Sanitize catalog sources and bind each operator to one
//! 7. Plan, confirm and apply namespaces, catalog sources, operator group and
//!    subscriptions
//!
//! Errors in steps 1-5 end the run. From step 5 on, per-operator and per-action
//! failures are reported and the rest of the batch carries on.

use crate::apply::{
    self, ApplyReport, AutoApprove, ClusterClient, ConfirmationGate, Oc, PlanSettings, PlanState,
    PromptGate,
};
use crate::binder;
use crate::cli::DeployArgs;
use crate::config::DeployConfig;
use crate::error::{DeployError, Result};
use crate::fetcher::{ArtifactFetcher, IbmPak, PackagingTool};
use crate::metadata::{self, CatalogFile, MetadataProvider};
use crate::preflight;
use crate::selection::{self, Selection};
use crate::ui::{
    InteractiveProgressReporter, Output, ProgressReporter, SilentProgressReporter, display,
};

/// External collaborators of one deploy run
pub struct Collaborators<'a> {
    pub metadata: &'a dyn MetadataProvider,
    pub packaging: &'a dyn PackagingTool,
    pub cluster: &'a dyn ClusterClient,
    pub gate: &'a dyn ConfirmationGate,
}

/// Run deploy command
pub fn run(args: DeployArgs, verbose: bool) -> Result<()> {
    let config = DeployConfig::from_args(args, verbose)?;
    let output = Output::new(config.verbose);

    let catalog = load_catalog(&config)?;
    let oc = Oc::new(&config.oc, output);
    let ibm_pak = IbmPak::new(&config.ibm_pak, &config.pak_home, output);
    let gate: Box<dyn ConfirmationGate> = if config.non_interactive {
        Box::new(AutoApprove)
    } else {
        Box::new(PromptGate)
    };

    let collaborators = Collaborators {
        metadata: &catalog,
        packaging: &ibm_pak,
        cluster: &oc,
        gate: gate.as_ref(),
    };

    if let Some(report) = deploy(&config, &collaborators, &output)? {
        report_outcome(&report, &output);
    }
    Ok(())
}

/// Catalog for this run; a file that cannot be read or parsed fails resolution
fn load_catalog(config: &DeployConfig) -> Result<CatalogFile> {
    let loaded = match &config.metadata {
        Some(path) => CatalogFile::load(path),
        None => CatalogFile::bundled(),
    };
    loaded.map_err(|e| DeployError::ResolutionFailed {
        version: config.version.clone(),
        cause: e.to_string(),
    })
}

/// Run the pipeline; `None` when there was nothing to apply, e.g. with `--list`
pub fn deploy(
    config: &DeployConfig,
    with: &Collaborators<'_>,
    output: &Output,
) -> Result<Option<ApplyReport>> {
    let resolved = metadata::resolve(with.metadata, &config.version)?;
    if resolved.dropped > 0 {
        output.warn(format!(
            "Skipped {} incomplete or duplicate catalog entr{} for version {}",
            resolved.dropped,
            if resolved.dropped == 1 { "y" } else { "ies" },
            resolved.version
        ));
    }

    if config.list_only {
        if config.json {
            println!("{}", display::catalog_json(&resolved)?);
        } else {
            display::display_catalog(&resolved);
        }
        return Ok(None);
    }

    let selection = Selection::from_names(&config.selection);
    let filtered = selection::filter(
        &resolved.operators,
        &selection,
        &config.policy.exclusions,
    )?;
    for rule in &filtered.excluded {
        output.warn(format!(
            "Not installing {} because it is bundled with {}",
            rule.bundled, rule.bundler
        ));
    }
    let mut records = filtered.operators;
    if records.is_empty() {
        output.warn("No operators selected, nothing to deploy.");
        return Ok(None);
    }

    display::display_deploy_summary(
        &records,
        &config.catalog_namespace,
        &config.target_namespace,
    );
    if config.needs_operator_group() {
        output.detail(format!(
            "An operator group will be created in {}",
            config.target_namespace
        ));
    }

    preflight::check(with.cluster, &config.ibm_pak, output)?;

    // Verbose runs print the packaging tool's own lines, so no bar
    let mut progress: Box<dyn ProgressReporter> = if config.non_interactive || config.verbose {
        Box::new(SilentProgressReporter)
    } else {
        Box::new(InteractiveProgressReporter::new(records.len() as u64))
    };
    let fetcher = ArtifactFetcher::new(
        with.packaging,
        &config.download_dir(),
        &config.policy.catalog_source_prefix,
        *output,
    );
    let fetched = fetcher.fetch(&mut records, progress.as_mut())?;
    if !fetched.failed.is_empty() {
        output.warn(format!(
            "Packaging tool reported problems for: {}",
            fetched.failed.join(", ")
        ));
    }

    let candidates = binder::bind(&mut records, &config.policy, output);
    output.detail(format!(
        "Discovered catalog sources: {}",
        candidates.join(", ")
    ));

    let settings = PlanSettings {
        catalog_namespace: &config.catalog_namespace,
        target_namespace: &config.target_namespace,
        manifest_dir: &config.manifest_dir,
        policy: &config.policy,
    };
    let (mut plan, skipped) = apply::plan(&records, &settings, with.cluster);
    for error in &skipped {
        output.error(format!("{error}"));
    }
    if plan.is_empty() {
        output.status("Nothing to apply.");
        return Ok(None);
    }

    plan.describe(output);
    if plan.confirm(with.gate)? == PlanState::Aborted {
        output.status("Continuing without applying changes.");
    }

    Ok(Some(plan.execute(with.cluster, output)))
}

fn report_outcome(report: &ApplyReport, output: &Output) {
    match report.state {
        PlanState::Done => {
            let failures: Vec<_> = report.failures().collect();
            if failures.is_empty() {
                output.heading(format!("Applied {} change(s).", report.outcomes.len()));
            } else {
                output.warn(format!(
                    "\n{} of {} change(s) failed:",
                    failures.len(),
                    report.outcomes.len()
                ));
                for failure in failures {
                    output.action(failure.action.to_string());
                }
            }
        }
        PlanState::Aborted => output.status("No changes were applied."),
        PlanState::Planned | PlanState::Confirmed | PlanState::Applying => {}
    }
}
