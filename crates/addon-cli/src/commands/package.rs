//! `package-addon` implementation.

use crate::formatters::format_output;
use addon_core::cli::{ExitCode, OutputFormat};
use addon_core::{ChannelName, RepoConfig};
use addon_packager::Packager;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Runs the packager.
///
/// # Arguments
///
/// * `addon_source` - Addon source directory containing `addon.xml`
/// * `channel` - Channel to publish into; must be listed in `[channels] package`
/// * `repo_root` - Repository root the output is written below
/// * `output_format` - Report format (json, text, pretty)
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the channel is not
/// allowed, or packaging fails.
pub fn run(
    addon_source: PathBuf,
    channel: Option<String>,
    repo_root: PathBuf,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let config = RepoConfig::load(&repo_root)?;
    let channel = channel
        .as_deref()
        .map(|name| ChannelName::from_allowed(name, &config.channels.package))
        .transpose()?;

    let outcome = Packager::new(repo_root)
        .package(&addon_source, channel.as_ref())
        .with_context(|| format!("failed to package {}", addon_source.display()))?;

    let output = format_output(&outcome, output_format).context("failed to format report")?;
    println!("{output}");

    if let Some(channel) = &outcome.channel {
        info!("Next: run 'generate-repo {channel}' to update the channel index");
    }

    Ok(ExitCode::SUCCESS)
}
