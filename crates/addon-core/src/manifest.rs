//! Addon manifest (`addon.xml`) reading.
//!
//! The manifest is treated as an opaque, maintainer-authored document. Only the
//! `id` and `version` attributes of the first `<addon>` element are
//! interpreted; the raw text is kept so the index generator can splice it into
//! the channel manifest without re-serializing it.
//!
//! # Examples
//!
//! ```
//! use addon_core::AddonManifest;
//!
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <addon id="plugin.demo" version="1.2.0" name="Demo">
//!   <extension point="xbmc.python.pluginsource" library="main.py"/>
//! </addon>"#;
//!
//! let manifest = AddonManifest::parse(xml, "addon.xml").unwrap();
//! assert_eq!(manifest.id(), "plugin.demo");
//! assert_eq!(manifest.version(), "1.2.0");
//! assert!(!manifest.fragment().contains("<?xml"));
//! ```

use crate::error::{Error, Result};
use crate::types::validate_dir_name;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the per-addon manifest.
pub const MANIFEST_FILE: &str = "addon.xml";

/// Name of the element carrying the addon identity.
const ADDON_ELEMENT: &[u8] = b"addon";

/// Parsed view of an `addon.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonManifest {
    path: PathBuf,
    id: String,
    version: String,
    raw: String,
}

impl AddonManifest {
    /// Loads `addon.xml` from an addon directory.
    ///
    /// # Errors
    ///
    /// * [`Error::MissingManifest`] - the directory has no `addon.xml`
    /// * [`Error::InvalidManifest`] - the file is not UTF-8 or not well-formed XML
    /// * [`Error::Io`] - the file exists but cannot be read
    pub fn load_from_dir(addon_dir: impl AsRef<Path>) -> Result<Self> {
        let addon_dir = addon_dir.as_ref();
        let manifest_path = addon_dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(Error::MissingManifest {
                path: addon_dir.to_path_buf(),
            });
        }
        Self::read(&manifest_path)
    }

    /// Reads and parses a manifest file.
    ///
    /// Line endings are normalized to `\n` and a leading byte-order mark is
    /// dropped.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidManifest`] - the file is not UTF-8 or not well-formed XML
    /// * [`Error::Io`] - the file cannot be read
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| Error::InvalidManifest {
            path: path.to_path_buf(),
            reason: format!("not valid UTF-8: {e}"),
        })?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        Self::parse(&normalize_newlines(text), path)
    }

    /// Parses manifest text.
    ///
    /// The whole document must be well-formed with a single root element.
    /// Missing `id`/`version` attributes read as empty strings; use
    /// [`require_identity`](Self::require_identity) when both are mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidManifest`] if the XML is malformed or contains
    /// no `<addon>` element.
    pub fn parse(raw: &str, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |reason: String| Error::InvalidManifest {
            path: path.to_path_buf(),
            reason,
        };

        let mut reader = Reader::from_str(raw);
        let mut depth = 0usize;
        let mut roots = 0usize;
        let mut identity: Option<(String, String)> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(element)) => {
                    if depth == 0 {
                        roots += 1;
                    }
                    depth += 1;
                    if identity.is_none() && element.name().as_ref() == ADDON_ELEMENT {
                        identity = Some(read_identity(&element).map_err(invalid)?);
                    }
                }
                Ok(Event::Empty(element)) => {
                    if depth == 0 {
                        roots += 1;
                    }
                    if identity.is_none() && element.name().as_ref() == ADDON_ELEMENT {
                        identity = Some(read_identity(&element).map_err(invalid)?);
                    }
                }
                Ok(Event::End(_)) => depth = depth.saturating_sub(1),
                Ok(Event::Text(text)) => {
                    if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) {
                        return Err(invalid("text outside the root element".to_string()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(invalid(format!(
                        "{e} (at byte {})",
                        reader.buffer_position()
                    )));
                }
            }
        }

        if depth != 0 {
            return Err(invalid("unclosed element at end of document".to_string()));
        }
        match roots {
            0 => return Err(invalid("document has no root element".to_string())),
            1 => {}
            _ => return Err(invalid("document has more than one root element".to_string())),
        }

        let (id, version) =
            identity.ok_or_else(|| invalid("no <addon> element found".to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            id,
            version,
            raw: raw.to_string(),
        })
    }

    /// Ensures both `id` and `version` are usable for naming output files.
    ///
    /// The id becomes a directory name, so it must be a single path component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidManifest`] if either attribute is empty or the
    /// id is not a valid directory name.
    pub fn require_identity(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidManifest {
            path: self.path.clone(),
            reason,
        };

        if self.id.is_empty() {
            return Err(invalid("<addon> element has no id attribute".to_string()));
        }
        if self.version.is_empty() {
            return Err(invalid("<addon> element has no version attribute".to_string()));
        }
        validate_dir_name(&self.id).map_err(|e| invalid(e.to_string()))?;
        if self.version.contains('/') || self.version.contains('\\') {
            return Err(invalid(format!(
                "version '{}' contains a path separator",
                self.version
            )));
        }
        Ok(())
    }

    /// Addon identifier (`id` attribute, empty if absent).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Addon version (`version` attribute, empty if absent).
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Path the manifest was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Manifest text as read, with normalized line endings.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Archive file name derived from the identity: `<id>-<version>.zip`.
    #[must_use]
    pub fn archive_name(&self) -> String {
        format!("{}-{}.zip", self.id, self.version)
    }

    /// Manifest text with every line containing an XML declaration removed.
    ///
    /// Each remaining line (including a trailing empty one when the text ends
    /// with a newline) is emitted followed by `\n`, exactly as it appears in
    /// the channel manifest.
    #[must_use]
    pub fn fragment(&self) -> String {
        let mut fragment = String::with_capacity(self.raw.len() + 1);
        for line in self.raw.split('\n') {
            if !line.contains("<?xml") {
                fragment.push_str(line);
                fragment.push('\n');
            }
        }
        fragment
    }
}

/// Extracts `id` and `version` from an `<addon>` start tag.
fn read_identity(element: &BytesStart<'_>) -> std::result::Result<(String, String), String> {
    let attribute = |name: &str| -> std::result::Result<String, String> {
        match element.try_get_attribute(name) {
            Ok(Some(attr)) => attr
                .unescape_value()
                .map(std::borrow::Cow::into_owned)
                .map_err(|e| format!("bad '{name}' attribute: {e}")),
            Ok(None) => Ok(String::new()),
            Err(e) => Err(format!("bad attributes on <addon>: {e}")),
        }
    };
    Ok((attribute("id")?, attribute("version")?))
}

/// Converts CRLF and lone CR line endings to LF.
fn normalize_newlines(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}
