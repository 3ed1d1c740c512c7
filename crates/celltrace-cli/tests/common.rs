//! Shared fixture for CLI integration tests.
//!
//! Each integration test file compiles this module separately, so unused
//! helpers are expected.
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const BENCH_SESSION: &str = "Session_20250301_120000";
pub const EMPTY_SESSION: &str = "Session_20250302_090000";

pub struct TestFixture {
    temp_dir: TempDir,
    data_dir: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".celltrace");

        Self { temp_dir, data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Scratch directory outside the workspace, for export targets.
    pub fn scratch(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    /// `celltrace` with the workspace pinned to this fixture.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("celltrace").expect("Failed to find celltrace binary");
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .env_remove("CELLTRACE_PATH")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Import a fixture record, optionally under another name.
    pub fn import(&self, fixture: &str, name: Option<&str>) {
        let mut cmd = self.command();
        cmd.arg("session")
            .arg("import")
            .arg(Self::fixture_path(fixture));
        if let Some(name) = name {
            cmd.arg("--name").arg(name);
        }
        cmd.assert().success();
    }

    pub fn json_output(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .arg("--format")
            .arg("json")
            .args(args)
            .output()
            .expect("Failed to run celltrace");

        assert!(
            output.status.success(),
            "celltrace {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }
}
