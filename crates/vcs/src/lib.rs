//! Git plumbing for change-driven type checking
//!
//! This crate provides:
//! - Repository detection and validation (`GitRepo::open`)
//! - Name-status diffs against a commit range or the staged index
//! - Typed diff entries (`FileStatus`, `DiffEntry`)

pub mod diff;
pub mod repo;

// Re-exports
pub use diff::{parse_name_status, DiffEntry, FileStatus};
pub use repo::GitRepo;

use std::path::PathBuf;

/// Errors from git invocations and repository validation
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The configured path has no `.git` entry.
    #[error("not a git repository (no .git found in {})", .0.display())]
    NotARepository(PathBuf),

    /// The repository path could not be resolved against the working
    /// directory.
    #[error("failed to resolve repository path: {0}")]
    CurrentDir(std::io::Error),

    /// The git binary could not be spawned.
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// git ran but exited non-zero.
    #[error("git {command} failed: {stderr}")]
    CommandFailed {
        /// Subcommand that failed (e.g. "diff").
        command: String,
        /// Trimmed stderr from git.
        stderr: String,
    },
}

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;
