//! Strong domain types for addon repository tooling.
//!
//! # Examples
//!
//! ```
//! use addon_core::ChannelName;
//!
//! let channel = ChannelName::new("testing").unwrap();
//! assert_eq!(channel.as_str(), "testing");
//!
//! // Channel names double as directory names, so traversal is rejected.
//! assert!(ChannelName::new("../outside").is_err());
//! ```

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Release channel name (newtype over String).
///
/// A channel is a directory directly under the repository root that holds one
/// subdirectory per addon. The name is validated as a single path component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ChannelName(String);

impl ChannelName {
    /// Creates a channel name after validating it as a directory component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if the name is empty, `.`/`..`, or
    /// contains path separators or control characters.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_dir_name(&name)?;
        Ok(Self(name))
    }

    /// Creates a channel name that must belong to `allowed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannel`] if `name` is not in `allowed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_core::{ChannelName, Error};
    ///
    /// let allowed = ["pre-release".to_string(), "testing".to_string()];
    /// assert!(ChannelName::from_allowed("testing", &allowed).is_ok());
    /// assert!(matches!(
    ///     ChannelName::from_allowed("stable", &allowed),
    ///     Err(Error::InvalidChannel { .. })
    /// ));
    /// ```
    pub fn from_allowed(name: &str, allowed: &[String]) -> Result<Self> {
        if !allowed.iter().any(|candidate| candidate == name) {
            return Err(Error::InvalidChannel {
                channel: name.to_string(),
                allowed: allowed.to_vec(),
            });
        }
        Self::new(name)
    }

    /// Returns the channel name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<std::path::Path> for ChannelName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

/// Validates that a name is safe to use as a single directory name.
///
/// Rejects names that:
/// - Are empty
/// - Are parent or current directory references (`.` or `..`)
/// - Contain path separators (`/` or `\`)
/// - Contain control characters
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the name is invalid.
pub fn validate_dir_name(name: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(Error::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return reject("name cannot be empty");
    }

    if name == "." || name == ".." {
        return reject("name cannot be '.' or '..'");
    }

    if name.contains('/') || name.contains('\\') {
        return reject("name cannot contain path separators");
    }

    if name.chars().any(char::is_control) {
        return reject("name cannot contain control characters");
    }

    Ok(())
}
