//! Test fixtures shared by unit tests.
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, create_test_files};
//!
//! let temp = create_temp_dir();
//! create_test_files(&temp, &[("metadata.yaml", "...")]);
//! ```

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// Absolute base for temp dirs, so a relative `TMPDIR` never puts them under
/// the current working directory.
fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// Create files below `temp` from (relative path, content) pairs.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn create_test_files(temp: &TempDir, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = temp.path().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_temp_dir_is_absolute() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
        assert!(temp.path().is_absolute());
    }

    #[test]
    fn test_create_test_files_creates_parents() {
        let temp = create_temp_dir();
        create_test_files(
            &temp,
            &[("data/mirror/ibm-mq/1.0.0/catalog-sources.yaml", "name: x\n")],
        );
        assert!(
            temp.path()
                .join("data/mirror/ibm-mq/1.0.0/catalog-sources.yaml")
                .is_file()
        );
    }
}
