#![allow(dead_code)] // not every test binary uses every helper

//! Common utilities for integration tests
//!
//! Builds throwaway git repositories with the real `git` binary and stub
//! `flow` executables (shell scripts) so the checker contract can be
//! driven end-to-end without Flow installed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Install a fmt subscriber so checker tracing shows up in test output.
///
/// Safe to call from every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Throwaway git repository
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Initialize a fresh repository with a committer identity.
    pub fn init() -> Self {
        init_tracing();

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repo = Self { dir };

        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test"]);
        repo.git(&["config", "commit.gpgsign", "false"]);

        repo
    }

    /// Repository root path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file under the repository root, creating parent dirs.
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, content).expect("Failed to write file");
    }

    /// Run a git command in the repository, panicking on failure.
    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .current_dir(self.dir.path())
            .args(args)
            .output()
            .expect("Failed to run git");

        assert!(
            output.status.success(),
            "git {:?} failed:\n{}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Scripted behavior for a stub `flow` executable
pub struct StubFlow {
    pub ls_stdout: String,
    pub ls_exit: i32,
    pub check_stdout: String,
    pub check_stderr: String,
    pub check_exit: i32,
}

impl Default for StubFlow {
    fn default() -> Self {
        Self {
            ls_stdout: "[]".to_string(),
            ls_exit: 0,
            check_stdout: String::new(),
            check_stderr: String::new(),
            check_exit: 0,
        }
    }
}

impl StubFlow {
    /// Write the stub into `dir` and return the executable path.
    ///
    /// The script replays canned stdout/stderr from payload files next to
    /// it and records the arguments of each `focus-check` invocation in
    /// `focus-args.txt` (one argument per line).
    #[cfg(unix)]
    pub fn write(&self, dir: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        fs::write(dir.join("ls-stdout.json"), &self.ls_stdout).expect("Failed to write payload");
        fs::write(dir.join("check-stdout.json"), &self.check_stdout)
            .expect("Failed to write payload");
        fs::write(dir.join("check-stderr.txt"), &self.check_stderr)
            .expect("Failed to write payload");

        let script = format!(
            r#"#!/bin/sh
stub_dir="{dir}"
cmd="$1"
shift
case "$cmd" in
  ls)
    cat "$stub_dir/ls-stdout.json"
    exit {ls_exit}
    ;;
  focus-check)
    printf '%s\n' "$@" > "$stub_dir/focus-args.txt"
    cat "$stub_dir/check-stdout.json"
    cat "$stub_dir/check-stderr.txt" >&2
    exit {check_exit}
    ;;
esac
exit 1
"#,
            dir = dir.display(),
            ls_exit = self.ls_exit,
            check_exit = self.check_exit,
        );

        let bin = dir.join("flow");
        fs::write(&bin, script).expect("Failed to write stub flow");
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod stub flow");

        bin
    }
}

/// Arguments recorded by the stub's last `focus-check` invocation.
pub fn recorded_focus_args(dir: &Path) -> Option<Vec<String>> {
    let raw = fs::read_to_string(dir.join("focus-args.txt")).ok()?;
    Some(raw.lines().map(str::to_string).collect())
}
