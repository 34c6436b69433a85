//! Checker configuration

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use vcs::GitRepo;

/// Configuration for a focused check run
///
/// Holds the validated repository handle, the base path Flow-relative
/// paths are computed against, the optional commit range, and the Flow
/// executable to invoke. The executable is part of the configuration,
/// not resolved from any process-wide location.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    repo: GitRepo,
    base_path: PathBuf,
    commit_range: Option<String>,
    flow_bin: PathBuf,
}

impl CheckConfig {
    /// Create a configuration for the given repository.
    ///
    /// Fails immediately when the path is not a git working tree. The
    /// base path defaults to the process current working directory and
    /// the Flow binary to `flow` on `PATH`.
    pub fn new(repo_path: impl AsRef<Path>) -> Result<Self> {
        let repo = GitRepo::open(repo_path)?;
        let base_path = std::env::current_dir()
            .context("Failed to get current directory")?;

        Ok(Self {
            repo,
            base_path,
            commit_range: None,
            flow_bin: PathBuf::from("flow"),
        })
    }

    /// Diff against a commit range instead of the staged index.
    pub fn with_commit_range(mut self, range: impl Into<String>) -> Self {
        self.commit_range = Some(range.into());
        self
    }

    /// Override the base path relative paths are computed against.
    pub fn with_base_path(mut self, base: impl Into<PathBuf>) -> Self {
        self.base_path = base.into();
        self
    }

    /// Override the Flow executable.
    pub fn with_flow_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.flow_bin = bin.into();
        self
    }

    /// The validated repository handle
    pub fn repo(&self) -> &GitRepo {
        &self.repo
    }

    /// Base path for relative-path computation
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Commit range, if configured
    pub fn commit_range(&self) -> Option<&str> {
        self.commit_range.as_deref()
    }

    /// Flow executable path
    pub fn flow_bin(&self) -> &Path {
        &self.flow_bin
    }
}
