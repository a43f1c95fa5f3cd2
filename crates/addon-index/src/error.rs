//! Error types for index generation.

use std::path::PathBuf;

/// Result type for index generation.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors that can occur while generating repository indexes.
///
/// A bad manifest inside a channel is not an error at this level: the addon
/// is skipped and reported in the channel report instead.
#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    /// No channel directory could be resolved.
    #[error("No channels found. Expected directories: {}", expected.join(", "))]
    NoChannels {
        /// Directory names that would have been recognized
        expected: Vec<String>,
    },

    /// A listing or output path fell outside the repository root.
    #[error("Path {} is not inside {}", path.display(), root.display())]
    OutsideRoot {
        /// Offending path
        path: PathBuf,
        /// Repository root
        root: PathBuf,
    },

    /// Channel name or configuration error.
    #[error(transparent)]
    Core(#[from] addon_core::Error),

    /// I/O error while reading channels or writing outputs.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<walkdir::Error> for IndexError {
    fn from(err: walkdir::Error) -> Self {
        Self::Io(err.into())
    }
}
