use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::expansion::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL};
use crate::grading::DEFAULT_TOLERANCE;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub grading: GradingConfig,

    #[serde(default)]
    pub expansion: ExpansionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding per-user memory files. Defaults to
    /// ~/.tutorbuddy/memory when unset.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GradingConfig {
    pub tolerance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExpansionConfig {
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&config_path, toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;

        Ok(home.join(".tutorbuddy").join("config.toml"))
    }

    /// Grading tolerance, falling back to the built-in default
    pub fn tolerance(&self) -> f64 {
        self.grading.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    /// Model used for optional hint expansion
    pub fn expansion_model(&self) -> &str {
        self.expansion.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Base URL of the expansion endpoint
    pub fn expansion_base_url(&self) -> &str {
        self.expansion
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_OLLAMA_URL)
    }
}
