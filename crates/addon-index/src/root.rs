//! Root page injection.
//!
//! The repository's top-level `index.html` is hand-written. The generator
//! only swaps the hidden-link block right after its opening `<body>` tag and
//! never creates the page.

use crate::error::Result;
use crate::listing::{LISTING_FILE, ListingEntry, hidden_block};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\n?<!-- hidden-links -->.*?<!-- /hidden-links -->").expect("valid regex")
});
static BODY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body(?:\s[^>]*)?>").expect("valid regex"));

/// What happened to the root page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPageStatus {
    /// The hidden-link block was written
    Updated,
    /// The page already carried the same block
    Unchanged,
    /// No root page exists
    Missing,
    /// The page has no `<body>` tag and was left alone
    NoBodyTag,
}

/// Replaces any hidden-link block in `page` with one listing `entries`.
///
/// The new block goes directly after the first `<body>` tag. Returns `None`
/// if the page has no body tag. Applying it twice yields the same page.
///
/// # Examples
///
/// ```
/// use addon_index::listing::ListingEntry;
/// use addon_index::root::inject_hidden_links;
///
/// let page = "<html><body class=\"dark\">\n<h1>Repo</h1>\n</body></html>\n";
/// let entries = [ListingEntry::dir("stable")];
///
/// let once = inject_hidden_links(page, &entries).unwrap();
/// assert!(once.contains("<body class=\"dark\">\n<!-- hidden-links -->"));
/// assert_eq!(inject_hidden_links(&once, &entries).unwrap(), once);
/// ```
#[must_use]
pub fn inject_hidden_links(page: &str, entries: &[ListingEntry]) -> Option<String> {
    let stripped = BLOCK_REGEX.replace_all(page, "");
    let body = BODY_REGEX.find(&stripped)?;

    let block = hidden_block(entries);
    let mut updated = String::with_capacity(stripped.len() + block.len() + 1);
    updated.push_str(&stripped[..body.end()]);
    updated.push('\n');
    updated.push_str(&block);
    updated.push_str(&stripped[body.end()..]);
    Some(updated)
}

/// Updates `<repo_root>/index.html` in place with `entries`.
///
/// # Errors
///
/// Returns an I/O error if the page exists but cannot be read or written.
pub fn update_root_page(repo_root: &Path, entries: &[ListingEntry]) -> Result<RootPageStatus> {
    let path = repo_root.join(LISTING_FILE);
    if !path.is_file() {
        tracing::debug!("No root page at {}, skipping", path.display());
        return Ok(RootPageStatus::Missing);
    }

    let page = fs::read_to_string(&path)?;
    let Some(updated) = inject_hidden_links(&page, entries) else {
        tracing::warn!("No <body> tag in {}, leaving it unchanged", path.display());
        return Ok(RootPageStatus::NoBodyTag);
    };

    if updated == page {
        tracing::debug!("Root page already up to date");
        return Ok(RootPageStatus::Unchanged);
    }

    fs::write(&path, updated)?;
    tracing::info!("Updated root page: {}", path.display());
    Ok(RootPageStatus::Updated)
}
