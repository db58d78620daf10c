//! Shared testing utilities for yarnrc CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated `$HOME` with helpers for the store and the active link.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// `~/.yarnrc`
    pub fn link(&self) -> PathBuf {
        self.home().join(".yarnrc")
    }

    /// `~/.yarnrcs`
    pub fn store(&self) -> PathBuf {
        self.home().join(".yarnrcs")
    }

    pub fn profile(&self, name: &str) -> PathBuf {
        self.store().join(name)
    }

    /// Build a command for the compiled binary with only `$HOME` pointing at the sandbox.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("yarnrc").expect("Failed to locate yarnrc binary");
        cmd.env("HOME", self.home())
            .env_remove("YARNRC")
            .env_remove("YARNRC_STORE")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run once with no arguments so the store exists.
    pub fn initialized() -> Self {
        let ctx = Self::new();
        ctx.cli().assert().success();
        ctx
    }

    /// Base name of the link target, if the link is a symlink.
    pub fn active(&self) -> Option<String> {
        fs::read_link(self.link())
            .ok()
            .and_then(|t| t.file_name().map(|n| n.to_string_lossy().into_owned()))
    }

    pub fn assert_link_is_symlink(&self) {
        let meta = fs::symlink_metadata(self.link()).expect(".yarnrc should exist");
        assert!(meta.file_type().is_symlink(), ".yarnrc should be a symlink");
    }
}
