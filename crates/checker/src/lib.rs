//! Focused Flow type-checking for changed files
//!
//! This crate decides which files changed in a git repository should be
//! re-checked by Flow, runs `flow focus-check` over just those files, and
//! filters the diagnostics back down to the files that were asked about.
//!
//! The pipeline:
//! - `FlowChecker::target_files`: added/modified files from git
//!   (staged index, or a commit range)
//! - `FlowChecker::focus_check`: narrow to files Flow tracks
//!   (`flow ls`), run the focused check, filter the error list
//!
//! The two calls are independent suspension points; callers chain them.
//! Nothing is cached or persisted between runs.

pub mod checker;
pub mod config;
pub mod paths;
pub mod result;

// Re-exports
pub use checker::FlowChecker;
pub use config::CheckConfig;
pub use result::{ErrorRecord, FocusCheckResult, ToolFailure};
