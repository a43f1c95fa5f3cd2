//! Argument definitions for both binaries.

use addon_core::cli::OutputFormat;
use anyhow::{Context, Result};
use clap::{Args, Parser};
use std::path::PathBuf;

/// Options shared by `package-addon` and `generate-repo`.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Repository root holding the channel directories (default: current directory)
    #[arg(long, env = "ADDON_REPO_ROOT", value_name = "DIR")]
    pub repo_root: Option<PathBuf>,

    /// Report format (json, text, pretty)
    #[arg(long = "format", default_value = "pretty", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Returns the repository root, falling back to the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no root was given and the current directory is
    /// unavailable.
    pub fn repo_root(&self) -> Result<PathBuf> {
        match &self.repo_root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir().context("failed to determine current directory"),
        }
    }
}

/// Package a Kodi addon into `<id>-<version>.zip`.
///
/// Without a channel the archive is written to the repository root. With a
/// channel it goes to `<channel>/<addon-id>/`, together with the addon's
/// `addon.xml`, `icon.png`, and `fanart.jpg`.
#[derive(Parser, Debug)]
#[command(name = "package-addon")]
#[command(version, about, long_about = None)]
pub struct PackageCli {
    /// Addon source directory containing addon.xml
    #[arg(value_name = "ADDON_SOURCE")]
    pub addon_source: PathBuf,

    /// Release channel to publish into (see `[channels] package` in repo.toml)
    #[arg(value_name = "CHANNEL")]
    pub channel: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Generate addons.xml, addons.xml.md5, and listings for repository channels.
///
/// Without channel names, every directory in the repository root matching
/// `[channels] discover` in repo.toml is processed.
#[derive(Parser, Debug)]
#[command(name = "generate-repo")]
#[command(version, about, long_about = None)]
pub struct GenerateCli {
    /// Channels to process (default: discover)
    #[arg(value_name = "CHANNEL")]
    pub channels: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}
