//! Repository index generation for a Kodi addon repository.
//!
//! Each channel directory holds one subdirectory per addon. For every channel
//! the generator writes:
//!
//! - `addons.xml`: every addon's `addon.xml`, declaration lines removed,
//!   inside a single `<addons>` envelope
//! - `addons.xml.md5`: the MD5 of those exact bytes
//! - `index.html` in the channel and every directory below it, with a hidden
//!   block of anchors whose text equals their target
//!
//! Afterwards the hidden block of an existing root `index.html` is replaced
//! with links to every processed channel that exists on disk.
//!
//! # Consistency
//!
//! A channel manifest is assembled in memory and written together with its
//! checksum, so the two files always agree. A channel without a single valid
//! addon keeps its previous outputs. Running the generator twice without
//! changes produces identical files.
//!
//! # Examples
//!
//! ```no_run
//! use addon_core::RepoConfig;
//! use addon_index::RepoGenerator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = RepoGenerator::new("/srv/repo", RepoConfig::load("/srv/repo")?);
//! let report = generator.generate(&["stable".to_string()])?;
//!
//! for channel in &report.channels {
//!     println!("{}: {:?}", channel.channel, channel.checksum);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod checksum;
mod discovery;
pub mod error;
mod generator;
pub mod listing;
mod manifest;
pub mod root;

pub use discovery::{discover_channels, resolve_channels};
pub use error::{IndexError, Result};
pub use generator::{ChannelReport, ChannelStatus, RepoGenerator, RepoReport, SkippedAddon};
pub use manifest::{
    AddonEntry, CHANNEL_MANIFEST_FILE, CHECKSUM_FILE, ChannelManifest, MANIFEST_FOOTER,
    MANIFEST_HEADER, WrittenManifest,
};
pub use root::RootPageStatus;
