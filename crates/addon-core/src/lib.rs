//! Core types, manifest parsing, and errors for addon repository tooling.
//!
//! This crate provides the foundational types shared by the packager and the
//! index generator. The two tools never call each other; they only agree on the
//! on-disk layout `<repo-root>/<channel>/<addon-id>/...` and on the types here.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`ChannelName`) and directory-name validation
//! - `AddonManifest`, the `id`/`version` view of an `addon.xml`
//! - Error hierarchy with contextual information
//! - CLI primitives (`ExitCode`, `OutputFormat`)
//! - Repository configuration (`RepoConfig`, loaded from `repo.toml`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
mod config;
mod error;
mod manifest;
mod types;

pub use config::{CONFIG_FILE, ChannelsConfig, IndexConfig, RepoConfig};
pub use error::{Error, Result};
pub use manifest::{AddonManifest, MANIFEST_FILE};
pub use types::{ChannelName, validate_dir_name};
