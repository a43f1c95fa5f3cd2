//! `package-addon`: package a Kodi addon into a zip archive.

use addon_cli::cli::PackageCli;
use addon_cli::commands;
use addon_cli::runner::{init_logging, parse_or_exit};
use anyhow::Result;

fn main() -> Result<()> {
    let cli: PackageCli = parse_or_exit();
    init_logging(cli.common.verbose)?;

    let repo_root = cli.common.repo_root()?;
    let exit_code = commands::package::run(
        cli.addon_source,
        cli.channel,
        repo_root,
        cli.common.format,
    )?;

    std::process::exit(exit_code.as_i32());
}
