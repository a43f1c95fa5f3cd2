//! Channel resolution.

use crate::error::{IndexError, Result};
use addon_core::ChannelName;
use std::path::Path;
use walkdir::WalkDir;

/// Resolves the channels to process.
///
/// Explicit names are validated and kept in the given order, duplicates
/// dropped. They may name directories that do not exist; the generator warns
/// and skips those. Without explicit names, directories under `repo_root`
/// whose name is in `discover` are picked up in sorted order.
///
/// # Errors
///
/// Returns [`IndexError::Core`] for a name that is not a single directory
/// component, or [`IndexError::NoChannels`] if nothing resolves.
pub fn resolve_channels(
    repo_root: &Path,
    requested: &[String],
    discover: &[String],
) -> Result<Vec<ChannelName>> {
    let channels = if requested.is_empty() {
        discover_channels(repo_root, discover)?
    } else {
        let mut channels: Vec<ChannelName> = Vec::with_capacity(requested.len());
        for name in requested {
            let channel = ChannelName::new(name.as_str())?;
            if !channels.contains(&channel) {
                channels.push(channel);
            }
        }
        channels
    };

    if channels.is_empty() {
        return Err(IndexError::NoChannels {
            expected: discover.to_vec(),
        });
    }
    Ok(channels)
}

/// Lists directories directly under `repo_root` whose name is in `discover`.
///
/// # Errors
///
/// Returns an I/O error if `repo_root` cannot be read.
pub fn discover_channels(repo_root: &Path, discover: &[String]) -> Result<Vec<ChannelName>> {
    let mut channels = Vec::new();
    for entry in WalkDir::new(repo_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if discover.iter().any(|candidate| *candidate == name) {
            channels.push(ChannelName::new(name.into_owned())?);
        }
    }
    Ok(channels)
}
