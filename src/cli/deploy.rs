use std::path::PathBuf;

use clap::Parser;

use crate::config::{ALL_NAMESPACES, MARKETPLACE_NAMESPACE};

/// Arguments for the deploy command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   List the operators of a release:\n    cp4i-deploy deploy -v 16.1.0 --list\n\n\
                   Install everything cluster-wide:\n    cp4i-deploy deploy -v 16.1.0\n\n\
                   Install selected operators into one namespace:\n    \
                   cp4i-deploy deploy -v 16.1.0 -o ibm-mq --target-namespace cp4i\n\n\
                   Install without prompting:\n    cp4i-deploy deploy -v 16.1.0 --non-interactive")]
pub struct DeployArgs {
    /// The CP4I release version, e.g. 16.1.0
    #[arg(long, short = 'v')]
    pub version: String,

    /// Operator(s) to install, by literal name (repeatable)
    #[arg(long, short = 'o', value_name = "NAME", default_value = "all")]
    pub operator: Vec<String>,

    /// Namespace for the operator subscriptions (default: all namespaces)
    #[arg(long, value_name = "NAMESPACE", default_value = ALL_NAMESPACES)]
    pub target_namespace: String,

    /// Namespace the catalog sources are applied to
    #[arg(long, value_name = "NAMESPACE", default_value = MARKETPLACE_NAMESPACE, conflicts_with = "namespaced")]
    pub catalog_namespace: String,

    /// Apply catalog sources to the target namespace (requires --target-namespace)
    #[arg(long)]
    pub namespaced: bool,

    /// List the operators of the release and exit
    #[arg(long)]
    pub list: bool,

    /// Print the list as JSON (with --list)
    #[arg(long)]
    pub json: bool,

    /// Do not ask for confirmation before applying changes
    #[arg(long)]
    pub non_interactive: bool,

    /// Metadata catalog file (defaults to the bundled catalog)
    #[arg(long, value_name = "FILE", env = "CP4I_METADATA")]
    pub metadata: Option<PathBuf>,

    /// Policy file overriding exclusion rules, fragile operators and delays
    #[arg(long, value_name = "FILE", env = "CP4I_POLICY")]
    pub policy: Option<PathBuf>,

    /// IBMPAK_HOME for the ibm-pak plugin; CASE files land in <DIR>/.ibm-pak (cleared on every run)
    #[arg(long, value_name = "DIR", env = "CP4I_PAK_HOME", default_value = ".")]
    pub pak_home: PathBuf,

    /// Directory generated subscription/operator group files are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub manifest_dir: PathBuf,

    /// Path to the ibm-pak plugin binary
    #[arg(long, value_name = "PATH", env = "CP4I_IBM_PAK", default_value = "./oc-ibm_pak")]
    pub ibm_pak: PathBuf,

    /// Path to the oc binary
    #[arg(long, value_name = "PATH", env = "CP4I_OC", default_value = "oc")]
    pub oc: PathBuf,
}
