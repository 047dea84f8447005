//! Configuration loading utilities

use crate::schema::Config;
use codedrop_common::GuildId;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Settings file used when `CODEDROP_SETTINGS` is not set.
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// File extension is not one of json, yaml, yml, toml
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

impl From<ConfigError> for codedrop_common::DropError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("Failed to load settings", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from `CODEDROP_SETTINGS` (or `settings.json`), apply
    /// environment overrides and validate.
    ///
    /// A missing settings file is not an error as long as the environment
    /// supplies the token.
    pub fn load() -> Result<Config, ConfigError> {
        let path = env::var("CODEDROP_SETTINGS")
            .map_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH), PathBuf::from);

        let mut config = if path.exists() {
            info!("Loading settings from {}", path.display());
            Self::parse_file(&path)?
        } else {
            info!("No settings file at {}, using defaults", path.display());
            Config::default()
        };

        Self::apply_env_overrides(&mut config, |var| env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a specific file without environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let config = Self::parse_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a settings file, choosing the format from its extension.
    pub fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        debug!("Parsing {} settings file", extension);
        let config: Config = match extension.as_str() {
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        Ok(config)
    }

    /// Apply environment variable overrides to configuration.
    ///
    /// `lookup` resolves a variable name to its value; production code
    /// passes `std::env::var`.
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            config.bot_token = token;
        }

        if let Some(guild) = lookup("CODEDROP_GUILD_ID") {
            let id = guild.trim().parse::<u64>().map_err(|e| ConfigError::EnvParseError {
                var: "CODEDROP_GUILD_ID".to_string(),
                source: Box::new(e),
            })?;
            config.guild_id = Some(GuildId(id));
        }

        if let Some(prefix) = lookup("CODEDROP_PREFIX") {
            config.prefix = prefix;
        }

        if let Some(base_dir) = lookup("CODEDROP_BASE_DIR") {
            config.storage.base_dir = PathBuf::from(base_dir);
        }

        if let Some(registry_file) = lookup("CODEDROP_REGISTRY_FILE") {
            config.storage.registry_file = PathBuf::from(registry_file);
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.logging.file = Some(PathBuf::from(file));
        }

        Ok(())
    }
}
