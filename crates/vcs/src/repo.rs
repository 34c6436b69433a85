//! Git repository handle
//!
//! `GitRepo` validates the working tree at construction and owns the git
//! subprocess invocations. All git calls run with the repository root as
//! the working directory.

use crate::diff::{parse_name_status, DiffEntry};
use crate::{GitError, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Handle on a validated git working tree
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Open a git working tree.
    ///
    /// Relative paths are resolved against the current working directory
    /// so every path derived from the root comes out absolute. Fails when
    /// the path has no `.git` entry; a plain `exists` check covers both
    /// the usual `.git` directory and the gitfile a linked worktree
    /// carries.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let root = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(GitError::CurrentDir)?
                .join(path)
        };

        if !root.join(".git").exists() {
            return Err(GitError::NotARepository(root));
        }

        Ok(Self { root })
    }

    /// Repository root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a name-status diff and parse it into entries.
    ///
    /// With a commit range the diff covers that range; without one it
    /// covers the staged index (`--cached`). Output is requested in `-z`
    /// mode so paths containing whitespace stay intact.
    pub async fn diff_name_status(&self, commit_range: Option<&str>) -> Result<Vec<DiffEntry>> {
        let mut args = vec!["diff", "--name-status", "-z"];
        match commit_range {
            Some(range) => args.push(range),
            None => args.push("--cached"),
        }

        tracing::debug!(root = %self.root.display(), ?args, "running git");

        let output = Command::new("git")
            .current_dir(&self.root)
            .args(&args)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed {
                command: "diff".to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_name_status(&stdout))
    }
}
