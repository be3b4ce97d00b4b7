//! cp4i-deploy - Cloud Pak for Integration operator installer
//!
//! Resolves the operators of a CP4I release, downloads their CASE files with the
//! ibm-pak plugin, binds each operator to a catalog source and subscribes it on
//! the current OpenShift cluster after confirmation.

use clap::Parser;
use miette::Diagnostic;

mod apply;
mod binder;
mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod fetcher;
mod manifest;
mod metadata;
mod preflight;
mod selection;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Deploy(args) => commands::deploy::run(args, cli.verbose),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(e.exit_code());
    }
}
