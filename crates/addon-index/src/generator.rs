//! Repository index generation.
//!
//! Provides [`RepoGenerator`], which rebuilds each channel's `addons.xml`,
//! `addons.xml.md5`, and listings, then refreshes the root page.

use crate::discovery::resolve_channels;
use crate::error::Result;
use crate::listing::{ListingEntry, write_listings};
use crate::manifest::{AddonEntry, ChannelManifest};
use crate::root::{RootPageStatus, update_root_page};
use addon_core::{AddonManifest, ChannelName, MANIFEST_FILE, RepoConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of processing one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelStatus {
    /// Manifest, checksum, and listings were written
    Published,
    /// No valid addon was found; previous outputs were left in place
    Empty,
    /// The channel directory does not exist
    Missing,
}

/// An addon directory left out of a channel manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAddon {
    /// Directory name under the channel
    pub dir: String,
    /// Why it was skipped
    pub reason: String,
}

/// Report for one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelReport {
    /// Channel name
    pub channel: ChannelName,
    /// What happened to the channel
    pub status: ChannelStatus,
    /// Addons included in the manifest, in manifest order
    pub addons: Vec<AddonEntry>,
    /// Addon directories that were skipped
    pub skipped: Vec<SkippedAddon>,
    /// MD5 of the written manifest
    pub checksum: Option<String>,
    /// Number of `index.html` files written
    pub listings: usize,
}

impl ChannelReport {
    const fn new(channel: ChannelName, status: ChannelStatus) -> Self {
        Self {
            channel,
            status,
            addons: Vec::new(),
            skipped: Vec::new(),
            checksum: None,
            listings: 0,
        }
    }

    /// Returns `true` if the channel's outputs were written.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == ChannelStatus::Published
    }

    /// Returns `true` if the channel directory exists, whether or not new
    /// outputs were written.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.status != ChannelStatus::Missing
    }
}

/// Report for a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoReport {
    /// Per-channel reports in processing order
    pub channels: Vec<ChannelReport>,
    /// What happened to the root page
    pub root_page: RootPageStatus,
}

impl RepoReport {
    /// Returns the channels whose outputs were written.
    pub fn published(&self) -> impl Iterator<Item = &ChannelReport> {
        self.channels.iter().filter(|c| c.is_published())
    }
}

/// Repository index generator.
///
/// # Examples
///
/// ```no_run
/// use addon_core::RepoConfig;
/// use addon_index::RepoGenerator;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RepoConfig::load(".")?;
/// let generator = RepoGenerator::new(".", config);
///
/// // No names: discover channels from the configured set
/// let report = generator.generate(&[])?;
/// for channel in report.published() {
///     println!("{}: {} addons", channel.channel, channel.addons.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RepoGenerator {
    repo_root: PathBuf,
    config: RepoConfig,
}

impl RepoGenerator {
    /// Creates a generator for the repository at `repo_root`.
    #[must_use]
    pub fn new(repo_root: impl Into<PathBuf>, config: RepoConfig) -> Self {
        Self {
            repo_root: repo_root.into(),
            config,
        }
    }

    /// Returns the repository root.
    #[must_use]
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Processes the requested channels, or the discovered ones if none are
    /// given, then updates the root page.
    ///
    /// A channel that is missing or holds no valid addon is reported, not
    /// treated as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if no channel resolves, a requested name is invalid,
    /// or an output cannot be written.
    pub fn generate(&self, requested: &[String]) -> Result<RepoReport> {
        let channels = resolve_channels(
            &self.repo_root,
            requested,
            &self.config.channels.discover,
        )?;
        let names: Vec<&str> = channels.iter().map(ChannelName::as_str).collect();
        tracing::info!(
            "Processing {} channel(s): {}",
            channels.len(),
            names.join(", ")
        );

        let mut reports = Vec::with_capacity(channels.len());
        for channel in channels {
            reports.push(self.generate_channel(channel)?);
        }

        let present: Vec<&ChannelName> = reports
            .iter()
            .filter(|r| r.is_present())
            .map(|r| &r.channel)
            .collect();
        let root_page = self.update_root(&present)?;

        Ok(RepoReport {
            channels: reports,
            root_page,
        })
    }

    /// Rebuilds one channel's manifest, checksum, and listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel cannot be read or an output cannot be
    /// written. Unreadable addon manifests are skipped, not returned.
    pub fn generate_channel(&self, channel: ChannelName) -> Result<ChannelReport> {
        let channel_dir = self.repo_root.join(&channel);
        if !channel_dir.is_dir() {
            tracing::warn!("Channel '{}' does not exist, skipping", channel);
            return Ok(ChannelReport::new(channel, ChannelStatus::Missing));
        }

        tracing::info!("Generating for channel: {}/", channel);
        let mut report = ChannelReport::new(channel, ChannelStatus::Empty);
        let mut manifest = ChannelManifest::new();

        for entry in WalkDir::new(&channel_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let dir = entry.file_name().to_string_lossy().into_owned();

            if !entry.path().join(MANIFEST_FILE).is_file() {
                tracing::info!("Skipping {}/ - no {} found", dir, MANIFEST_FILE);
                report.skipped.push(SkippedAddon {
                    dir,
                    reason: format!("no {MANIFEST_FILE} found"),
                });
                continue;
            }

            match AddonManifest::load_from_dir(entry.path()) {
                Ok(addon) => {
                    tracing::info!("Added: {} v{}", addon.id(), addon.version());
                    manifest.push(dir, &addon);
                }
                Err(e) => {
                    tracing::warn!("Error processing {}/{}: {}", dir, MANIFEST_FILE, e);
                    report.skipped.push(SkippedAddon {
                        dir,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if manifest.is_empty() {
            tracing::warn!("No valid addons found in {}/", report.channel);
            return Ok(report);
        }

        let written = manifest.write(&channel_dir)?;
        tracing::info!("MD5: {}", written.checksum);
        tracing::info!("Total addons: {}", manifest.addons().len());

        report.listings = write_listings(&self.repo_root, &channel_dir)?;
        tracing::info!(
            "Generated {} listing(s) under {}/",
            report.listings,
            report.channel
        );

        report.status = ChannelStatus::Published;
        report.addons = manifest.addons().to_vec();
        report.checksum = Some(written.checksum);
        Ok(report)
    }

    /// Rewrites the root page's hidden block with `channels` and the
    /// aggregate folder, when that folder exists.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the root page cannot be read or written.
    pub fn update_root(&self, channels: &[&ChannelName]) -> Result<RootPageStatus> {
        let mut entries: Vec<ListingEntry> = channels
            .iter()
            .map(|channel| ListingEntry::dir(channel.as_str()))
            .collect();

        let aggregate = &self.config.index.aggregate_dir;
        if !aggregate.is_empty() && self.repo_root.join(aggregate).is_dir() {
            entries.push(ListingEntry::dir(aggregate.as_str()));
        }

        entries.sort_by(|a, b| a.name().cmp(b.name()));
        entries.dedup();
        update_root_page(&self.repo_root, &entries)
    }
}
