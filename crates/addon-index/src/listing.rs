//! Hidden-link directory listings.
//!
//! Kodi's HTTP directory client cannot rely on server-side listings, so every
//! directory gets a static `index.html` with a hidden block of anchors whose
//! text equals their target. Directories end with `/`, files do not, and
//! entries are sorted by name.

use crate::error::{IndexError, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// File name of a generated listing.
pub const LISTING_FILE: &str = "index.html";

/// Marker opening the hidden-link block.
pub const BLOCK_START: &str = "<!-- hidden-links -->";

/// Marker closing the hidden-link block.
pub const BLOCK_END: &str = "<!-- /hidden-links -->";

/// Maintenance names that never appear in a listing and are never descended.
pub const LISTING_EXCLUDES: &[&str] = &[
    LISTING_FILE,
    ".git",
    ".github",
    ".gitignore",
    ".gitattributes",
    ".nojekyll",
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    "__pycache__",
    "CNAME",
    "README.md",
    addon_core::CONFIG_FILE,
];

/// Returns `true` if `name` is left out of listings.
#[must_use]
pub fn is_listing_excluded(name: &str) -> bool {
    LISTING_EXCLUDES.contains(&name)
}

/// One visible entry of a directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListingEntry {
    name: String,
    is_dir: bool,
}

impl ListingEntry {
    /// Creates a directory entry.
    #[must_use]
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    /// Creates a file entry.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    /// Returns the bare entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns the link target, which is also the anchor text.
    ///
    /// ```
    /// use addon_index::listing::ListingEntry;
    ///
    /// assert_eq!(ListingEntry::dir("plugin.demo").href(), "plugin.demo/");
    /// assert_eq!(ListingEntry::file("addons.xml").href(), "addons.xml");
    /// ```
    #[must_use]
    pub fn href(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Reads the visible entries of `dir`, sorted by name.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be read.
pub fn read_entries(dir: &Path) -> Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_listing_excluded(&name) {
            continue;
        }

        if entry.path().is_dir() {
            entries.push(ListingEntry::dir(name));
        } else {
            entries.push(ListingEntry::file(name));
        }
    }
    Ok(entries)
}

/// Escapes text for use in both HTML content and a quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the hidden-link block, markers included, without a trailing newline.
///
/// # Examples
///
/// ```
/// use addon_index::listing::{ListingEntry, hidden_block};
///
/// let block = hidden_block(&[ListingEntry::dir("stable"), ListingEntry::dir("zips")]);
/// assert_eq!(
///     block,
///     "<!-- hidden-links -->\n\
///      <div id=\"hidden-links\" style=\"display:none\">\n\
///      <a href=\"stable/\">stable/</a>\n\
///      <a href=\"zips/\">zips/</a>\n\
///      </div>\n\
///      <!-- /hidden-links -->"
/// );
/// ```
#[must_use]
pub fn hidden_block(entries: &[ListingEntry]) -> String {
    let mut block = String::new();
    block.push_str(BLOCK_START);
    block.push_str("\n<div id=\"hidden-links\" style=\"display:none\">\n");
    for entry in entries {
        let href = escape_html(&entry.href());
        block.push_str(&format!("<a href=\"{href}\">{href}</a>\n"));
    }
    block.push_str("</div>\n");
    block.push_str(BLOCK_END);
    block
}

/// Renders a complete listing page for the directory shown as `location`.
///
/// `location` is the path below the repository root with leading and
/// trailing slashes, e.g. `/stable/plugin.demo/`.
#[must_use]
pub fn render_page(location: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Index of {}", escape_html(location));

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    page.push_str(&format!("<title>{title}</title>\n"));
    page.push_str("</head>\n<body>\n");
    page.push_str(&hidden_block(entries));
    page.push_str(&format!("\n<h1>{title}</h1>\n"));
    page.push_str("<ul>\n");
    for entry in entries {
        let href = escape_html(&entry.href());
        page.push_str(&format!("<li><a href=\"{href}\">{href}</a></li>\n"));
    }
    page.push_str("</ul>\n</body>\n</html>\n");
    page
}

/// Returns the display location of `dir` below `root`, e.g. `/stable/`.
///
/// # Errors
///
/// Returns [`IndexError::OutsideRoot`] if `dir` is not below `root`.
pub fn location(root: &Path, dir: &Path) -> Result<String> {
    let relative = dir
        .strip_prefix(root)
        .map_err(|_| IndexError::OutsideRoot {
            path: dir.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let mut location = String::from("/");
    for component in relative.components() {
        location.push_str(&component.as_os_str().to_string_lossy());
        location.push('/');
    }
    Ok(location)
}

/// Writes `index.html` into `dir` and every non-excluded subdirectory below it.
///
/// Symlinked directories are listed but not descended. Returns the number of
/// listing files written.
///
/// # Errors
///
/// Returns an error if a directory cannot be read or a listing cannot be
/// written.
pub fn write_listings(root: &Path, dir: &Path) -> Result<usize> {
    let entries = read_entries(dir)?;
    let page = render_page(&location(root, dir)?, &entries);
    let path = dir.join(LISTING_FILE);
    fs::write(&path, page)?;
    tracing::debug!("Generated listing: {}", path.display());

    let mut written = 1;
    for entry in entries.iter().filter(|e| e.is_dir()) {
        let child = dir.join(entry.name());
        if fs::symlink_metadata(&child)?.file_type().is_symlink() {
            continue;
        }
        written += write_listings(root, &child)?;
    }
    Ok(written)
}
