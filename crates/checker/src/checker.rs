//! Focused check orchestration
//!
//! `FlowChecker` chains the two halves of a run: resolve the changed
//! files from git, then drive Flow over the subset it can see.

use crate::config::CheckConfig;
use crate::paths;
use crate::result::{filter_to_targets, FlowDiagnostics, FocusCheckResult, ToolFailure};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Orchestrates git target resolution and Flow focused checks
pub struct FlowChecker {
    config: CheckConfig,
}

impl FlowChecker {
    /// Create a checker from a validated configuration.
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Resolve the files that should be re-checked.
    ///
    /// Asks git for a name-status diff (commit range if configured,
    /// staged index otherwise) and returns the absolute path of every
    /// non-deleted entry, in diff order.
    pub async fn target_files(&self) -> Result<Vec<PathBuf>> {
        let repo = self.config.repo();
        let entries = repo
            .diff_name_status(self.config.commit_range())
            .await
            .context("Failed to diff repository")?;

        let files: Vec<PathBuf> = entries
            .into_iter()
            .filter(|entry| !entry.status.is_deleted())
            .map(|entry| repo.root().join(entry.path))
            .collect();

        tracing::debug!(count = files.len(), "resolved target files");
        Ok(files)
    }

    /// Run a focused check over the given absolute target files.
    ///
    /// Targets are narrowed to the files Flow tracks before invocation,
    /// and the returned error list is filtered back down to the original
    /// targets, since `--show-all-errors` reports project-wide.
    pub async fn focus_check(&self, targets: &[PathBuf]) -> Result<FocusCheckResult> {
        let base = self.config.base_path();

        // 1. Relativize targets against the base path
        let narrowed = narrow_targets(base, targets);

        // 2. Ask Flow which files it tracks
        let visible = self.visible_files().await?;

        // 3. Intersect: never ask Flow about a file it does not track
        let intersection: Vec<&PathBuf> = narrowed
            .iter()
            .filter(|file| visible.contains(file.as_path()))
            .collect();

        tracing::debug!(
            targets = targets.len(),
            narrowed = narrowed.len(),
            visible = visible.len(),
            checking = intersection.len(),
            "running focused check"
        );

        // 4. Invoke the focused check (an empty file list is still a
        //    valid invocation)
        let mut cmd = Command::new(self.config.flow_bin());
        cmd.current_dir(base)
            .args(["focus-check", "--json", "--show-all-errors"])
            .args(&intersection);

        let mut result = FocusCheckResult::default();

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(%err, "flow focus-check could not be run");
                result.tool_failure = Some(ToolFailure {
                    message: format!("flow focus-check could not be run: {err}"),
                    stderr: None,
                });
                return Ok(result);
            }
        };

        // 5. Interpret the outcome
        if output.status.success() {
            result.success = Some(
                serde_json::from_slice(&output.stdout)
                    .context("Failed to parse flow focus-check output")?,
            );
        } else if !output.stdout.is_empty() {
            // Non-zero exit with stdout is the normal "errors found" path
            match serde_json::from_slice::<FlowDiagnostics>(&output.stdout) {
                Ok(FlowDiagnostics {
                    errors: Some(errors),
                }) => {
                    result.errors = Some(filter_to_targets(errors, targets));
                }
                Ok(FlowDiagnostics { errors: None }) => {
                    tracing::warn!(status = %output.status, "flow reported no error list");
                    result.tool_failure = Some(ToolFailure {
                        message: format!(
                            "flow focus-check exited with {} but reported no error list",
                            output.status
                        ),
                        stderr: None,
                    });
                }
                Err(err) => {
                    tracing::warn!(%err, "flow produced unparseable diagnostics");
                    result.tool_failure = Some(ToolFailure {
                        message: format!("flow focus-check produced unparseable output: {err}"),
                        stderr: None,
                    });
                }
            }
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(status = %output.status, %stderr, "flow focus-check failed");
            result.tool_failure = Some(ToolFailure {
                message: format!("flow focus-check failed with {}", output.status),
                stderr: (!stderr.is_empty()).then_some(stderr),
            });
        }

        Ok(result)
    }

    /// Files Flow currently tracks, relativized against the base path.
    async fn visible_files(&self) -> Result<HashSet<PathBuf>> {
        let output = Command::new(self.config.flow_bin())
            .current_dir(self.config.base_path())
            .args(["ls", "--json"])
            .output()
            .await
            .context("Failed to run flow ls")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("flow ls failed: {}", stderr.trim());
        }

        let listed: Vec<PathBuf> = serde_json::from_slice(&output.stdout)
            .context("Failed to parse flow ls output")?;

        Ok(listed
            .iter()
            .filter_map(|absolute| paths::relative_to_base(self.config.base_path(), absolute))
            .collect())
    }
}

/// Relativize targets against the base path, dropping files outside it
/// and top-level dot entries, deduplicating in first-seen order.
fn narrow_targets(base: &Path, targets: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut narrowed = Vec::new();

    for target in targets {
        let Some(relative) = paths::relative_to_base(base, target) else {
            continue;
        };
        if paths::starts_with_dot(&relative) {
            continue;
        }
        if seen.insert(relative.clone()) {
            narrowed.push(relative);
        }
    }

    narrowed
}
