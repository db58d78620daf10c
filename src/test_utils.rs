//! Test utilities shared across test modules

use crate::paths::Paths;
use tempfile::TempDir;

/// Create a Paths struct for testing using a temporary directory
///
/// Mimics the real ~/.yarnrcs/ and ~/.yarnrc layout inside the temp directory.
/// Nothing is created on disk.
pub fn setup_test_paths(temp_dir: &TempDir) -> Paths {
    Paths {
        store_dir: temp_dir.path().join(".yarnrcs"),
        active_link: temp_dir.path().join(".yarnrc"),
    }
}
