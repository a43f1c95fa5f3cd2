//! Addon packaging for a Kodi addon repository.
//!
//! Turns an addon source directory into a distributable zip archive named
//! `<id>-<version>.zip`, where the id and version come from the addon's
//! `addon.xml`. Development artifacts (VCS metadata, editor and OS files,
//! caches, bytecode, earlier zip outputs) are left out.
//!
//! # Layout
//!
//! ```text
//! <repo-root>/
//! └── <channel>/
//!     └── <addon-id>/
//!         ├── <addon-id>-<version>.zip
//!         ├── addon.xml
//!         ├── icon.png
//!         └── fanart.jpg
//! ```
//!
//! Without a channel the archive lands directly in the repository root and no
//! metadata is copied.
//!
//! # Archive format
//!
//! - Members are stored as `<addon-id>/<relative path>` with deflate compression
//! - Members are sorted by path and stamped with the zip epoch, so the same
//!   source tree always yields the same bytes
//! - A failed run removes the archive instead of leaving a truncated file
//!
//! # Examples
//!
//! ```no_run
//! use addon_core::ChannelName;
//! use addon_packager::Packager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let packager = Packager::new("/srv/repo");
//! let outcome = packager.package("plugin.demo", Some(&ChannelName::new("testing")?))?;
//!
//! println!("{} ({} files)", outcome.archive_path.display(), outcome.files);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod archive;
pub mod error;
pub mod exclude;
mod packager;

pub use error::{PackageError, Result};
pub use packager::{METADATA_FILES, PackageOutcome, Packager};
