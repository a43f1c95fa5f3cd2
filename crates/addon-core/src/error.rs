//! Error types for addon repository tooling.
//!
//! Every failure the tools can report falls into one of a handful of
//! categories: a manifest that is missing or cannot be read, a channel argument
//! outside the accepted set, or a repository configuration problem. File-system
//! write failures belong to the crates that perform the writes.
//!
//! # Examples
//!
//! ```
//! use addon_core::{Error, Result};
//!
//! fn require_version(version: &str) -> Result<()> {
//!     if version.is_empty() {
//!         return Err(Error::InvalidManifest {
//!             path: "addon.xml".into(),
//!             reason: "missing version attribute".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_version("").unwrap_err();
//! assert!(matches!(err, Error::InvalidManifest { .. }));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for addon repository tooling.
#[derive(Error, Debug)]
pub enum Error {
    /// The addon directory has no `addon.xml`.
    #[error("addon.xml not found in {}", path.display())]
    MissingManifest {
        /// Directory that was expected to contain the manifest
        path: PathBuf,
    },

    /// The manifest exists but could not be read or interpreted.
    ///
    /// Covers invalid UTF-8, malformed XML, a document without an `<addon>`
    /// element, and `id`/`version` values the packager cannot use.
    #[error("Error parsing {}: {reason}", path.display())]
    InvalidManifest {
        /// Path of the offending manifest
        path: PathBuf,
        /// Why the manifest was rejected
        reason: String,
    },

    /// A channel argument outside the accepted set.
    #[error("Invalid channel '{channel}'. Must be one of: {}", allowed.join(", "))]
    InvalidChannel {
        /// The rejected channel name
        channel: String,
        /// Channels that would have been accepted
        allowed: Vec<String>,
    },

    /// A name that cannot be used as a single directory component.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Repository configuration is unreadable or malformed.
    #[error("Configuration error in {}: {message}", path.display())]
    ConfigError {
        /// Path of the configuration file
        path: PathBuf,
        /// Description of the configuration problem
        message: String,
    },

    /// I/O error while reading manifests or configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for addon repository operations.
pub type Result<T> = std::result::Result<T, Error>;
