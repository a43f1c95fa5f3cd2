//! Error types for addon packaging.

use std::path::PathBuf;

/// Result type for packaging operations.
pub type Result<T> = std::result::Result<T, PackageError>;

/// Errors that can occur while packaging an addon.
#[derive(thiserror::Error, Debug)]
pub enum PackageError {
    /// The addon source directory does not exist.
    #[error("Addon source not found: {}", path.display())]
    SourceNotFound {
        /// The path that was given as the source
        path: PathBuf,
    },

    /// The manifest is missing, unparsable, or names an unusable identity.
    ///
    /// Wraps [`addon_core::Error`] so callers can inspect the manifest
    /// failure category.
    #[error(transparent)]
    Manifest(#[from] addon_core::Error),

    /// Writing the zip archive failed.
    #[error("Error creating zip: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error while walking the source tree or writing outputs.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
