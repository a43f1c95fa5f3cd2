//! Zip archive assembly.
//!
//! Members are collected from the source tree in file-name order and written
//! with deflate compression under `<addon-id>/<relative path>`. Timestamps are
//! pinned to the zip epoch so identical sources yield identical archives.

use crate::error::Result;
use crate::exclude::is_excluded_path;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// A file to be stored in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Absolute path of the file on disk
    pub source: PathBuf,
    /// Member name inside the archive, always `<addon-id>/...` with `/` separators
    pub name: String,
}

/// RAII guard for archive cleanup on error.
///
/// Removes the archive file on drop unless [`commit`](Self::commit) was
/// called, so a failed run never leaves a truncated zip behind.
#[derive(Debug)]
pub(crate) struct ArchiveGuard {
    path: PathBuf,
    cleanup: bool,
}

impl ArchiveGuard {
    /// Creates a new guard for the given archive path.
    pub(crate) const fn new(path: PathBuf) -> Self {
        Self {
            path,
            cleanup: true,
        }
    }

    /// Keeps the archive, disabling cleanup on drop.
    pub(crate) fn commit(mut self) {
        self.cleanup = false;
    }
}

impl Drop for ArchiveGuard {
    fn drop(&mut self) {
        if self.cleanup && self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!(
                    "Failed to remove incomplete archive {}: {}",
                    self.path.display(),
                    e
                );
            } else {
                tracing::debug!("Removed incomplete archive: {}", self.path.display());
            }
        }
    }
}

/// Collects every non-excluded file under `source_root`.
///
/// Excluded directories are pruned, not descended. Symlinks to files are
/// stored as the files they point to; symlinks to directories are skipped.
///
/// # Errors
///
/// Returns an I/O error if any part of the tree cannot be read.
pub fn collect_members(source_root: &Path, addon_id: &str) -> Result<Vec<ArchiveMember>> {
    let walker = WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !entry
                .path()
                .strip_prefix(source_root)
                .is_ok_and(is_excluded_path)
        });

    let mut members = Vec::new();
    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        let file_type = entry.file_type();
        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(source_root) else {
            continue;
        };

        members.push(ArchiveMember {
            source: entry.path().to_path_buf(),
            name: member_name(addon_id, relative),
        });
    }

    Ok(members)
}

/// Builds the archive member name `<addon-id>/<relative>` with `/` separators.
#[must_use]
pub fn member_name(addon_id: &str, relative: &Path) -> String {
    let mut name = String::from(addon_id);
    for component in relative.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

/// Writes `members` into a new deflate-compressed archive at `zip_path`.
///
/// An existing file at `zip_path` is replaced.
///
/// # Errors
///
/// Returns an error if any member cannot be read or the archive cannot be
/// written. The partially written file is left for the caller to remove.
pub fn write_archive(zip_path: &Path, members: &[ArchiveMember]) -> Result<()> {
    let file = File::create(zip_path)?;
    let mut writer = ZipWriter::new(BufWriter::new(file));

    for member in members {
        let metadata = fs::metadata(&member.source)?;
        let options = member_options(&metadata);

        writer.start_file(member.name.as_str(), options)?;
        let mut input = File::open(&member.source)?;
        io::copy(&mut input, &mut writer)?;
        tracing::debug!("  Added: {}", member.name);
    }

    let mut output = writer.finish()?;
    output.flush()?;
    Ok(())
}

fn member_options(metadata: &fs::Metadata) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .large_file(metadata.len() >= u64::from(u32::MAX));

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode() & 0o777)
    };

    options
}
