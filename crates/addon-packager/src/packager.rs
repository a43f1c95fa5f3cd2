//! Addon packaging.
//!
//! Provides [`Packager`], which turns an addon source directory into
//! `<id>-<version>.zip` and, in channel mode, publishes the addon's metadata
//! next to the archive.

use crate::archive::{ArchiveGuard, collect_members, write_archive};
use crate::error::{PackageError, Result};
use addon_core::{AddonManifest, ChannelName, MANIFEST_FILE};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata files copied beside the archive in channel mode, when present.
pub const METADATA_FILES: &[&str] = &[MANIFEST_FILE, "icon.png", "fanart.jpg"];

/// Result of a successful packaging run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageOutcome {
    /// Addon id from the manifest
    pub addon_id: String,
    /// Addon version from the manifest
    pub version: String,
    /// Path of the written archive
    pub archive_path: PathBuf,
    /// Channel the addon was published to, if any
    pub channel: Option<ChannelName>,
    /// Number of files stored in the archive
    pub files: usize,
    /// Metadata files copied into the channel directory
    pub metadata_copied: Vec<String>,
}

/// Addon packager bound to a repository root.
///
/// Without a channel, archives are written directly into the repository
/// root. With a channel, they go to `<root>/<channel>/<addon-id>/`.
///
/// # Directory Structure
///
/// ```text
/// repo_root/
/// ├── plugin.demo-1.2.0.zip        (no channel)
/// └── testing/
///     └── plugin.demo/
///         ├── plugin.demo-1.2.0.zip
///         ├── addon.xml
///         ├── icon.png
///         └── fanart.jpg
/// ```
///
/// # Examples
///
/// ```no_run
/// use addon_core::ChannelName;
/// use addon_packager::Packager;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let packager = Packager::new(".");
/// let channel = ChannelName::new("testing")?;
/// let outcome = packager.package("../plugin.demo", Some(&channel))?;
/// println!("{}", outcome.archive_path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Packager {
    repo_root: PathBuf,
}

impl Packager {
    /// Creates a packager writing below `repo_root`.
    #[must_use]
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// Returns the repository root.
    #[must_use]
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Returns the directory an addon's archive is written to.
    #[must_use]
    pub fn output_dir(&self, addon_id: &str, channel: Option<&ChannelName>) -> PathBuf {
        channel.map_or_else(
            || self.repo_root.clone(),
            |channel| self.repo_root.join(channel).join(addon_id),
        )
    }

    /// Packages the addon at `source`.
    ///
    /// Reads `addon.xml` for the id and version, writes the archive, and in
    /// channel mode copies [`METADATA_FILES`] next to it, overwriting older
    /// copies. If any step fails the archive is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `source` does not exist
    /// - the manifest is missing, unparsable, or lacks an id or version
    /// - the output directory, archive, or a metadata copy cannot be written
    pub fn package(
        &self,
        source: impl AsRef<Path>,
        channel: Option<&ChannelName>,
    ) -> Result<PackageOutcome> {
        let source = source.as_ref();
        if !source.is_dir() {
            return Err(PackageError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        let source = source.canonicalize()?;

        let manifest = AddonManifest::load_from_dir(&source)?;
        manifest.require_identity()?;
        tracing::info!(
            "Packaging {} version {}",
            manifest.id(),
            manifest.version()
        );

        let output_dir = self.output_dir(manifest.id(), channel);
        fs::create_dir_all(&output_dir)?;
        let archive_path = output_dir.join(manifest.archive_name());

        let guard = ArchiveGuard::new(archive_path.clone());
        let members = collect_members(&source, manifest.id())?;
        write_archive(&archive_path, &members)?;
        tracing::info!(
            "Created {} ({} files)",
            archive_path.display(),
            members.len()
        );

        let metadata_copied = if channel.is_some() {
            copy_metadata(&source, &output_dir)?
        } else {
            Vec::new()
        };
        guard.commit();

        Ok(PackageOutcome {
            addon_id: manifest.id().to_string(),
            version: manifest.version().to_string(),
            archive_path,
            channel: channel.cloned(),
            files: members.len(),
            metadata_copied,
        })
    }
}

/// Copies the metadata files present in `source` into `output_dir`.
///
/// Returns the names of the files copied. A file whose destination is the
/// source itself is left alone.
fn copy_metadata(source: &Path, output_dir: &Path) -> Result<Vec<String>> {
    let mut copied = Vec::new();
    for name in METADATA_FILES {
        let from = source.join(name);
        if !from.is_file() {
            continue;
        }

        let to = output_dir.join(name);
        if is_same_file(&from, &to) {
            tracing::debug!("Skipping {}: source and destination match", name);
            continue;
        }

        fs::copy(&from, &to)?;
        tracing::info!("Copied {} to {}", name, output_dir.display());
        copied.push((*name).to_string());
    }
    Ok(copied)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
