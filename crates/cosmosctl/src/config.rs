//! Profile-based configuration
//!
//! Profiles live in a TOML file under the platform config directory, e.g.
//! `~/.config/cosmosctl/config.toml` on Linux:
//!
//! ```toml
//! default_profile = "prod"
//!
//! [profiles.prod]
//! subscription_id = "00000000-1111-2222-3333-444444444444"
//! resource_group = "CosmosDBResourceGroup3668"
//! account = "db9934"
//! ```
//!
//! Tokens may be stored in a profile but the COSMOSCTL_TOKEN environment
//! variable is the recommended place for them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Root of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Profile used when `--profile` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,

    /// Named connection profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Connection settings for one environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Azure subscription id
    pub subscription_id: String,

    /// Default resource group for scoped commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,

    /// Default database account for scoped commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Bearer token for the management endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Management endpoint override, for sovereign clouds or testing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// ARM api-version override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

impl Config {
    /// Load configuration from the default location, or an empty config
    /// if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the default location, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Default configuration file path for this platform.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "cosmosctl")
            .context("could not determine config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve a profile by name, or fall back to the default profile.
    pub fn resolve_profile<'a>(&'a self, name: Option<&'a str>) -> Option<(&'a str, &'a Profile)> {
        let name = name.or(self.default_profile.as_deref())?;
        self.profiles.get(name).map(|p| (name, p))
    }
}
