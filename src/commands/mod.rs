//! Command implementations for the cp4i-deploy CLI

pub mod completions;
pub mod deploy;
pub mod version;
