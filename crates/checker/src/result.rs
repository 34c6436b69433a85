//! Focused-check result types and error filtering

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Outcome of one focused check
///
/// At most one of `success`/`errors` is set. `tool_failure` is set exactly
/// when the checker failed in a way that produced neither, so callers can
/// tell "couldn't determine errors" apart from "no errors".
#[derive(Debug, Default, Serialize)]
pub struct FocusCheckResult {
    /// Opaque JSON payload from a clean run
    pub success: Option<serde_json::Value>,
    /// Diagnostics filtered to the requested files, in checker order
    pub errors: Option<Vec<ErrorRecord>>,
    /// Unrecognized checker failure
    pub tool_failure: Option<ToolFailure>,
}

impl FocusCheckResult {
    /// Whether the run completed and reported no relevant errors.
    pub fn is_clean(&self) -> bool {
        self.tool_failure.is_none()
            && self.errors.as_ref().map_or(true, Vec::is_empty)
    }
}

/// Checker invocation failure that produced no diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct ToolFailure {
    /// Human-readable failure description
    pub message: String,
    /// Captured stderr, when any was produced
    pub stderr: Option<String>,
}

/// One diagnostic from the checker
///
/// The payload is carried opaquely; only the `message` array is examined,
/// whose first component's `path` names the file the diagnostic belongs
/// to. Every other field round-trips untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorRecord {
    /// Message components; the first carries the primary location
    #[serde(default)]
    pub message: Vec<serde_json::Value>,
    /// Remaining payload, passed through verbatim
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl ErrorRecord {
    /// Path of the first message component, if present.
    pub fn primary_path(&self) -> Option<&str> {
        self.message.first()?.get("path")?.as_str()
    }
}

/// Top-level shape of the checker's diagnostic stdout
#[derive(Debug, Deserialize)]
pub struct FlowDiagnostics {
    /// Error records, absent on some failure shapes
    pub errors: Option<Vec<ErrorRecord>>,
}

/// Keep only errors whose primary location is one of the target files.
///
/// Targets are the original absolute paths, before base-path
/// relativization; `--show-all-errors` reports project-wide, so anything
/// else here is pre-existing noise the caller did not ask about. Records
/// without a primary path are dropped. Order is preserved.
pub fn filter_to_targets(errors: Vec<ErrorRecord>, targets: &[PathBuf]) -> Vec<ErrorRecord> {
    let target_set: HashSet<&Path> = targets.iter().map(PathBuf::as_path).collect();

    errors
        .into_iter()
        .filter(|error| {
            error
                .primary_path()
                .is_some_and(|path| target_set.contains(Path::new(path)))
        })
        .collect()
}
