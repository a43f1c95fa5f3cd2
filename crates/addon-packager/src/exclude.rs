//! Development-artifact exclusion rules.
//!
//! Matching is plain substring containment for names and plain suffix
//! matching for extensions. It is not glob matching: `.git` also excludes
//! `.github/` and `.gitignore`, and any path containing `.claude` anywhere is
//! dropped. Archives produced by earlier releases depend on these exact
//! semantics.
//!
//! Paths are matched relative to the addon source root, so the location of
//! the source tree on disk never affects the archive contents.

use std::path::Path;

/// Directory or file names excluded wherever they appear in a path.
pub const EXCLUDED_NAMES: &[&str] = &[
    ".git",
    ".github",
    ".gitignore",
    ".gitattributes",
    "__pycache__",
    ".vscode",
    ".idea",
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    ".claude",
];

/// File extensions excluded when a path ends with them.
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pyc", ".pyo", ".pyd", ".swp", ".swo", ".log", ".tmp", ".bak", ".zip",
];

/// Returns `true` if the path string matches any exclusion rule.
///
/// # Examples
///
/// ```
/// use addon_packager::exclude::is_excluded;
///
/// assert!(is_excluded("resources/.DS_Store"));
/// assert!(is_excluded("lib/module.pyc"));
/// assert!(is_excluded(".github/workflows/ci.yml"));
/// assert!(!is_excluded("resources/lib/main.py"));
///
/// // Substring semantics: a file merely containing ".log" mid-name is kept,
/// // but one ending in ".log" is not.
/// assert!(!is_excluded("changelog.txt"));
/// assert!(is_excluded("debug.log"));
/// ```
#[must_use]
pub fn is_excluded(path: &str) -> bool {
    EXCLUDED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        || EXCLUDED_NAMES.iter().any(|name| path.contains(name))
}

/// Returns `true` if a path relative to the source root is excluded.
#[must_use]
pub fn is_excluded_path(relative: &Path) -> bool {
    is_excluded(&relative.to_string_lossy())
}
