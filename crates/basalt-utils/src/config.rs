//! Configuration file handling for Basalt projects.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "basalt.toml";

/// Represents the basalt.toml configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub package: Package,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    /// Reported as the version of the resolved API.
    pub version: String,
}

/// Settings for the semantic resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Deepest allowed chain of nested includes.
    #[serde(default = "default_max_include_depth")]
    pub max_include_depth: usize,
    /// Sort namespaces, types, aliases and routes after resolution.
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

const fn default_max_include_depth() -> usize {
    32
}

const fn default_normalize() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_include_depth: default_max_include_depth(),
            normalize: default_normalize(),
        }
    }
}

impl Config {
    /// Creates a new default configuration with the given project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            package: Package {
                name: name.into(),
                version: "0.1.0".to_string(),
            },
            resolver: ResolverConfig::default(),
        }
    }

    /// Loads configuration from a basalt.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.as_ref().display()))
    }

    /// Saves configuration to a basalt.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration")?;

        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))
    }

    /// Finds the basalt.toml file starting from the current directory.
    ///
    /// # Errors
    /// Returns an error if no basalt.toml is found in the current or parent directories.
    pub fn find() -> Result<(Self, PathBuf)> {
        let current_dir =
            std::env::current_dir().with_context(|| "Failed to get current directory")?;
        Self::find_from(current_dir)
    }

    /// Finds the basalt.toml file starting from `start` and walking up.
    ///
    /// Returns the configuration and the directory that contains it.
    ///
    /// # Errors
    /// Returns an error if no basalt.toml is found in `start` or its parents,
    /// or if the file found cannot be loaded.
    pub fn find_from(start: impl Into<PathBuf>) -> Result<(Self, PathBuf)> {
        let mut current_dir = start.into();

        loop {
            let config_path = current_dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                let config = Self::load(&config_path)?;
                return Ok((config, current_dir));
            }

            if !current_dir.pop() {
                anyhow::bail!(
                    "Could not find {CONFIG_FILE_NAME} in current directory or any parent directory"
                );
            }
        }
    }
}
