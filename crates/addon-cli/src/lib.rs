//! Command-line front end for addon repository maintenance.
//!
//! Ships two independent binaries:
//! - `package-addon` - zip an addon source tree, optionally into a channel
//! - `generate-repo` - rebuild channel manifests, checksums, and listings
//!
//! They share argument conventions (`--repo-root`, `--format`, `-v`), the
//! logging setup, and the report formatters in this library.
//!
//! # Examples
//!
//! ```bash
//! # Package into the testing channel, then refresh its index
//! package-addon ../plugin.video.demo testing
//! generate-repo testing
//!
//! # Refresh every discovered channel, report as JSON
//! generate-repo --format json
//! ```

#![allow(clippy::format_push_string)]
#![allow(clippy::needless_pass_by_value)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;
