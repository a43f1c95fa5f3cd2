//! Channel manifest assembly.
//!
//! `addons.xml` is built by plain string concatenation: each addon's raw
//! `addon.xml` is split into lines, lines containing an XML declaration are
//! dropped, and the rest is appended inside a single `<addons>` envelope. The
//! fragments are never re-serialized, so attribute order and whitespace reach
//! Kodi exactly as the addon authors wrote them.

use crate::checksum::md5_hex;
use crate::error::Result;
use addon_core::AddonManifest;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the channel manifest.
pub const CHANNEL_MANIFEST_FILE: &str = "addons.xml";

/// File name of the channel manifest checksum.
pub const CHECKSUM_FILE: &str = "addons.xml.md5";

/// Opening of every channel manifest.
pub const MANIFEST_HEADER: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<addons>\n";

/// Closing of every channel manifest.
pub const MANIFEST_FOOTER: &str = "</addons>\n";

/// An addon accepted into a channel manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonEntry {
    /// Directory name under the channel
    pub dir: String,
    /// Addon id from the manifest
    pub id: String,
    /// Addon version from the manifest
    pub version: String,
}

/// In-memory channel manifest.
///
/// Nothing touches the disk until [`write`](Self::write), which stores the
/// manifest and its checksum from the same string.
///
/// # Examples
///
/// ```
/// use addon_core::AddonManifest;
/// use addon_index::ChannelManifest;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let addon = AddonManifest::parse(
///     "<?xml version=\"1.0\"?>\n<addon id=\"plugin.demo\" version=\"1.0.0\"/>",
///     "plugin.demo/addon.xml",
/// )?;
///
/// let mut manifest = ChannelManifest::new();
/// manifest.push("plugin.demo", &addon);
///
/// assert_eq!(
///     manifest.content(),
///     "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
///      <addons>\n\
///      <addon id=\"plugin.demo\" version=\"1.0.0\"/>\n\
///      </addons>\n"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChannelManifest {
    body: String,
    addons: Vec<AddonEntry>,
}

impl Default for ChannelManifest {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            body: String::from(MANIFEST_HEADER),
            addons: Vec::new(),
        }
    }

    /// Appends an addon's fragment.
    pub fn push(&mut self, dir: impl Into<String>, addon: &AddonManifest) {
        self.body.push_str(&addon.fragment());
        self.addons.push(AddonEntry {
            dir: dir.into(),
            id: addon.id().to_string(),
            version: addon.version().to_string(),
        });
    }

    /// Returns the addons appended so far, in order.
    #[must_use]
    pub fn addons(&self) -> &[AddonEntry] {
        &self.addons
    }

    /// Returns `true` if no addon has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addons.is_empty()
    }

    /// Returns the complete manifest text.
    #[must_use]
    pub fn content(&self) -> String {
        let mut content = String::with_capacity(self.body.len() + MANIFEST_FOOTER.len());
        content.push_str(&self.body);
        content.push_str(MANIFEST_FOOTER);
        content
    }

    /// Writes `addons.xml` and `addons.xml.md5` into `channel_dir`.
    ///
    /// Returns the written manifest paths and the checksum.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if either file cannot be written.
    pub fn write(&self, channel_dir: &Path) -> Result<WrittenManifest> {
        let content = self.content();
        let checksum = md5_hex(content.as_bytes());

        let manifest_path = channel_dir.join(CHANNEL_MANIFEST_FILE);
        let checksum_path = channel_dir.join(CHECKSUM_FILE);
        fs::write(&manifest_path, &content)?;
        fs::write(&checksum_path, &checksum)?;
        tracing::info!("Generated: {}", manifest_path.display());
        tracing::info!("Generated: {}", checksum_path.display());

        Ok(WrittenManifest {
            manifest_path,
            checksum_path,
            checksum,
        })
    }
}

/// Paths and checksum of a written channel manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenManifest {
    /// Path of `addons.xml`
    pub manifest_path: PathBuf,
    /// Path of `addons.xml.md5`
    pub checksum_path: PathBuf,
    /// MD5 hex digest stored in the checksum file
    pub checksum: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn addon(id: &str, version: &str) -> AddonManifest {
        let raw = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <addon id=\"{id}\" name=\"Demo\" version=\"{version}\">\n\
             \x20 <extension point=\"xbmc.python.pluginsource\" library=\"default.py\"/>\n\
             </addon>\n"
        );
        AddonManifest::parse(&raw, format!("{id}/addon.xml")).unwrap()
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = ChannelManifest::new();
        assert!(manifest.is_empty());
        assert_eq!(
            manifest.content(),
            format!("{MANIFEST_HEADER}{MANIFEST_FOOTER}")
        );
    }

    #[test]
    fn test_fragments_are_concatenated_in_order() {
        let mut manifest = ChannelManifest::new();
        manifest.push("plugin.a", &addon("plugin.a", "1.0.0"));
        manifest.push("plugin.b", &addon("plugin.b", "2.0.0"));

        let content = manifest.content();
        assert!(content.starts_with(MANIFEST_HEADER));
        assert!(content.ends_with("</addon>\n\n</addons>\n"));
        assert_eq!(content.matches("<?xml").count(), 1);

        let a = content.find("id=\"plugin.a\"").unwrap();
        let b = content.find("id=\"plugin.b\"").unwrap();
        assert!(a < b);
        assert!(content.contains("  <extension point=\"xbmc.python.pluginsource\""));

        let ids: Vec<_> = manifest.addons().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["plugin.a", "plugin.b"]);
    }

    #[test]
    fn test_write_pair_matches() {
        let temp = TempDir::new().unwrap();
        let mut manifest = ChannelManifest::new();
        manifest.push("plugin.a", &addon("plugin.a", "1.0.0"));

        let written = manifest.write(temp.path()).unwrap();

        let bytes = fs::read(&written.manifest_path).unwrap();
        let checksum = fs::read_to_string(&written.checksum_path).unwrap();
        assert_eq!(bytes, manifest.content().as_bytes());
        assert_eq!(checksum, written.checksum);
        assert!(!checksum.ends_with('\n'));
        assert_eq!(checksum, md5_hex(&bytes));
    }
}
