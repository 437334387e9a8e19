//! Tool configuration
//!
//! Read from `--config <path>` or `~/.sitewise-tools/config.toml`. Every
//! field has a default, so a missing or partial file is fine.

use crate::error::{Result, SiteWiseError};
use crate::export::DEFAULT_EXPORT_DIR;
use crate::throttle::ThrottleConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Throttles for each kind of call sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleSettings {
    /// Between listing pages and between hierarchy listings
    #[serde(default = "default_pagination_throttle")]
    pub pagination: ThrottleConfig,
    /// Describe calls while indexing parent models
    #[serde(default = "default_parent_map_throttle")]
    pub parent_map: ThrottleConfig,
    /// Per analyzed model in the model search
    #[serde(default = "default_search_throttle")]
    pub search: ThrottleConfig,
}

fn default_pagination_throttle() -> ThrottleConfig {
    ThrottleConfig::Fixed { delay_ms: 1000 }
}

fn default_parent_map_throttle() -> ThrottleConfig {
    ThrottleConfig::TokenBucket { per_second: 100 }
}

fn default_search_throttle() -> ThrottleConfig {
    ThrottleConfig::fixed_per_second(30)
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        Self {
            pagination: default_pagination_throttle(),
            parent_map: default_parent_map_throttle(),
            search: default_search_throttle(),
        }
    }
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Executable used to reach the service
    #[serde(default = "default_aws_command")]
    pub aws_command: String,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_hierarchy_timeout")]
    pub hierarchy_timeout_secs: u64,
    #[serde(default = "default_references_timeout")]
    pub references_timeout_secs: u64,
    #[serde(default)]
    pub throttle: ThrottleSettings,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

fn default_aws_command() -> String {
    "aws".to_string()
}

fn default_hierarchy_timeout() -> u64 {
    60
}

fn default_references_timeout() -> u64 {
    5 * 60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            aws_command: default_aws_command(),
            profile: None,
            region: None,
            hierarchy_timeout_secs: default_hierarchy_timeout(),
            references_timeout_secs: default_references_timeout(),
            throttle: ThrottleSettings::default(),
        }
    }
}

impl Config {
    /// Location of the per-user configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sitewise-tools").join("config.toml"))
    }

    /// Parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SiteWiseError::ConfigError(e.to_string()))
    }

    /// Load from `path` or the default location
    ///
    /// Returns the defaults when no file exists. An unreadable or invalid
    /// file is an error only when it was named explicitly.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::from_file(config_path);
        }
        match Self::default_path() {
            Some(default_config) if default_config.exists() => {
                Self::from_file(&default_config).or_else(|e| {
                    log::warn!(
                        "Ignoring {}: {}",
                        default_config.display(),
                        e
                    );
                    Ok(Self::default())
                })
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn hierarchy_timeout(&self) -> Duration {
        Duration::from_secs(self.hierarchy_timeout_secs)
    }

    pub fn references_timeout(&self) -> Duration {
        Duration::from_secs(self.references_timeout_secs)
    }
}
