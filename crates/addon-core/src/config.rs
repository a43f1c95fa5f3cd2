//! Repository configuration.
//!
//! An optional `repo.toml` at the repository root overrides the channel sets
//! and the aggregate folder name. Every field has a default, so a repository
//! without the file behaves exactly like one with an empty file.
//!
//! ```toml
//! [channels]
//! package = ["pre-release", "testing"]
//! discover = ["alpha", "beta", "piers", "stable"]
//!
//! [index]
//! aggregate_dir = "zips"
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// File name of the repository configuration.
pub const CONFIG_FILE: &str = "repo.toml";

/// Repository configuration.
///
/// # Examples
///
/// ```
/// use addon_core::RepoConfig;
///
/// let config = RepoConfig::default();
/// assert!(config.channels.package.contains(&"testing".to_string()));
/// assert_eq!(config.index.aggregate_dir, "zips");
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RepoConfig {
    /// Channel sets
    #[serde(default)]
    pub channels: ChannelsConfig,

    /// Index generation settings
    #[serde(default)]
    pub index: IndexConfig,
}

/// Channel sets recognized by the two tools.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelsConfig {
    /// Channels accepted as the packager's channel argument
    pub package: Vec<String>,

    /// Directory names the index generator picks up when no channel is given
    pub discover: Vec<String>,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            package: vec!["pre-release".to_string(), "testing".to_string()],
            discover: vec![
                "alpha".to_string(),
                "beta".to_string(),
                "piers".to_string(),
                "stable".to_string(),
            ],
        }
    }
}

/// Index generation settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Folder linked from the root page next to the channels, when it exists
    pub aggregate_dir: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            aggregate_dir: "zips".to_string(),
        }
    }
}

impl RepoConfig {
    /// Loads `repo.toml` from the repository root, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the file exists but cannot be read
    /// or parsed.
    pub fn load(repo_root: impl AsRef<Path>) -> Result<Self> {
        let path = repo_root.as_ref().join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| Error::ConfigError {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::ConfigError {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = RepoConfig::load(temp.path()).unwrap();
        assert_eq!(config, RepoConfig::default());
    }

    #[test]
    fn test_defaults() {
        let config = RepoConfig::default();
        assert_eq!(config.channels.package, ["pre-release", "testing"]);
        assert_eq!(config.channels.discover, ["alpha", "beta", "piers", "stable"]);
        assert_eq!(config.index.aggregate_dir, "zips");
    }

    #[test]
    fn test_load_partial_override() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "[channels]\ndiscover = [\"stable\", \"testing\"]\n",
        )
        .unwrap();

        let config = RepoConfig::load(temp.path()).unwrap();
        assert_eq!(config.channels.discover, ["stable", "testing"]);
        // Untouched sections keep their defaults.
        assert_eq!(config.channels.package, ["pre-release", "testing"]);
        assert_eq!(config.index.aggregate_dir, "zips");
    }

    #[test]
    fn test_load_full_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            r#"
[channels]
package = ["nightly"]
discover = ["nightly"]

[index]
aggregate_dir = "repo"
"#,
        )
        .unwrap();

        let config = RepoConfig::load(temp.path()).unwrap();
        assert_eq!(config.channels.package, ["nightly"]);
        assert_eq!(config.index.aggregate_dir, "repo");
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[channels\npackage = 3").unwrap();

        let err = RepoConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigError { .. }));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[index]\naggregate = \"zips\"\n").unwrap();

        assert!(RepoConfig::load(temp.path()).is_err());
    }
}
