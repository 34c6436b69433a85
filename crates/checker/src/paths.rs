//! Base-path relativization
//!
//! Flow wants paths relative to the project root, while git hands back
//! paths under the repository root. Both sides of the intersection are
//! relativized against the configured base path before comparison.

use std::path::{Component, Path, PathBuf};

/// Relativize an absolute path against the base path.
///
/// Returns `None` when the path is not under the base path; such a path
/// would only be expressible with a leading parent-directory marker and
/// is excluded from checking.
pub fn relative_to_base(base: &Path, absolute: &Path) -> Option<PathBuf> {
    absolute.strip_prefix(base).ok().map(Path::to_path_buf)
}

/// Whether a relative path starts with a dot component.
///
/// Matches dotfiles and dot-directories at the top level only; a hidden
/// file deeper in the tree is still checkable.
pub fn starts_with_dot(relative: &Path) -> bool {
    match relative.components().next() {
        Some(Component::Normal(first)) => first
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false),
        _ => false,
    }
}
