//! `generate-repo`: rebuild channel manifests, checksums, and listings.

use addon_cli::cli::GenerateCli;
use addon_cli::commands;
use addon_cli::runner::{init_logging, parse_or_exit};
use anyhow::Result;

fn main() -> Result<()> {
    let cli: GenerateCli = parse_or_exit();
    init_logging(cli.common.verbose)?;

    let repo_root = cli.common.repo_root()?;
    let exit_code = commands::generate::run(cli.channels, repo_root, cli.common.format)?;

    std::process::exit(exit_code.as_i32());
}
