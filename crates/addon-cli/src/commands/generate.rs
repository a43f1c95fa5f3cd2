//! `generate-repo` implementation.

use crate::formatters::format_output;
use addon_core::RepoConfig;
use addon_core::cli::{ExitCode, OutputFormat};
use addon_index::RepoGenerator;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Runs the index generator.
///
/// An empty `channels` list means discovery from `[channels] discover`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, no channel
/// resolves, or an output cannot be written.
pub fn run(
    channels: Vec<String>,
    repo_root: PathBuf,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let config = RepoConfig::load(&repo_root)?;
    let report = RepoGenerator::new(repo_root, config)
        .generate(&channels)
        .context("repository generation failed")?;

    let output = format_output(&report, output_format).context("failed to format report")?;
    println!("{output}");

    info!(
        "Repository generation completed: {} of {} channel(s) published",
        report.published().count(),
        report.channels.len()
    );
    Ok(ExitCode::SUCCESS)
}
