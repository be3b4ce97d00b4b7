//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - deploy: Deploy command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod deploy;

pub use completions::CompletionsArgs;
pub use deploy::DeployArgs;

/// cp4i-deploy - Cloud Pak for Integration operator installer
///
/// Resolve the operators of a CP4I release, fetch their CASE files, and subscribe
/// them on the current OpenShift cluster.
#[derive(Parser, Debug)]
#[command(
    name = "cp4i-deploy",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install Cloud Pak for Integration operators on OpenShift",
    long_about = "cp4i-deploy resolves the operators of a Cloud Pak for Integration release, \
                  downloads their CASE files with ibm-pak, applies the catalog sources and \
                  subscribes the operators, asking for confirmation before touching the cluster.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  cp4i-deploy deploy -v 16.1.0 --list                   \x1b[90m# List operators of a release\x1b[0m\n   \
                  cp4i-deploy deploy -v 16.1.0                          \x1b[90m# Install all operators\x1b[0m\n   \
                  cp4i-deploy deploy -v 16.1.0 -o ibm-mq -o ibm-appconnect\x1b[90m# Install selected operators\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve, fetch and install operators for a release
    Deploy(DeployArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
