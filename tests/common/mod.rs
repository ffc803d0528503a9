//! Common test utilities and helpers
//!
//! This module provides shared fixtures and a temporary-directory project
//! helper for integration tests.

use std::path::PathBuf;
use tempfile::TempDir;

/// A realistic lockfile exercising every section: a registry pod with a
/// subspec, an external-source pod with checkout options, and a plain pod.
pub const FULL_LOCKFILE: &str = "\
PODS:
  - Adjust (4.18.0):
      - Adjust/Core (= 4.18.0)
  - Adjust/Core (4.18.0)
  - Expecta (1.0.6)
  - Pulley (2.8.0)

DEPENDENCIES:
  - Adjust (~> 4.18)
  - Expecta
  - Pulley (from `https://github.com/52inc/Pulley.git`, branch `master`)

SPEC REPOS:
  trunk:
    - Adjust
    - Expecta

EXTERNAL SOURCES:
  Pulley:
    :git: https://github.com/52inc/Pulley.git
    :branch: master

CHECKOUT OPTIONS:
  Pulley:
    :commit: d01b8b3fd6c4923cdec4b2d7ff2ecf4e8d8b1b75
    :git: https://github.com/52inc/Pulley.git

SPEC CHECKSUMS:
  Adjust: 4a4d7d0ed46fa80d52c8eddbb5e83f28b4bd2ab2
  Expecta: 3b6bd90a64b9a1dcb0b70aa0e10a7f8f631667d5
  Pulley: 7d0b94b48295a5d4a4fed1a0383f594a0e99563c

PODFILE CHECKSUM: 73a1a4dba3d9e09bba5e1b3eb24a9eb372b25e34

COCOAPODS: 1.7.3
";

/// A lockfile predating the optional sections entirely.
pub const LEGACY_LOCKFILE: &str = "\
PODS:
  - Expecta (1.0.6)

DEPENDENCIES:
  - Expecta
";

/// Test project context
///
/// Creates a temporary directory to hold lockfiles under a directory name
/// of the caller's choosing.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Write a lockfile under `<project>/<dir_name>/Podfile.lock` and
    /// return its path.
    pub fn write_lockfile(&self, dir_name: &str, contents: &str) -> PathBuf {
        let dir = self.dir.path().join(dir_name);
        std::fs::create_dir_all(&dir).expect("Failed to create project directory");
        let path = dir.join("Podfile.lock");
        std::fs::write(&path, contents).expect("Failed to write lockfile");
        path
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
