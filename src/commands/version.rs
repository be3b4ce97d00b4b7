//! Version command implementation

use crate::error::Result;
use crate::fetcher::ibm_pak::IBM_PAK_RELEASE;
use crate::metadata::CatalogFile;

/// Run version command
pub fn run() -> Result<()> {
    println!("cp4i-deploy {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Profile: {}", build_profile());
    println!("  ibm-pak release: {IBM_PAK_RELEASE}");
    println!(
        "  Bundled CP4I versions: {}",
        CatalogFile::bundled()?.versions().join(", ")
    );

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_runs() {
        assert!(run().is_ok());
    }

    #[test]
    fn test_bundled_catalog_has_versions() {
        assert!(!CatalogFile::bundled().unwrap().versions().is_empty());
    }
}
