//! Test harness utilities for keynest integration tests.
//!
//! Provides an isolated store directory per test and a command builder
//! pointed at it.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated store directory.
pub struct TestEnv {
    /// Temporary store directory
    pub dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// A keynest command pointed at the isolated store.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("keynest").expect("failed to find keynest binary");
        cmd.env("KEYNEST_DIR", self.dir.path());
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Path to the data tree inside the store directory.
    pub fn data_path(&self) -> PathBuf {
        self.dir.path().join("store.json")
    }

    /// Write raw JSON into the data tree, bypassing the CLI.
    pub fn write_data(&self, contents: &str) {
        std::fs::write(self.data_path(), contents).expect("failed to seed store file");
    }
}
