//! Settings schema definitions using serde.

use codedrop_common::{GuildId, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the codedrop bot.
///
/// Only `bot_token` is required in the settings file; every other section
/// falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord bot token.
    #[serde(alias = "token")]
    pub bot_token: String,
    /// Guild to register commands in. Commands are registered globally when unset.
    pub guild_id: Option<GuildId>,
    /// Prefix for message-based commands.
    pub prefix: String,
    /// Storage layout.
    pub storage: StorageConfig,
    /// Dispense limits.
    pub dispense: DispenseConfig,
    /// Archive download settings.
    pub http: HttpConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Where code sets and the registry live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one subdirectory per code set.
    pub base_dir: PathBuf,
    /// JSON file listing the registered set names.
    pub registry_file: PathBuf,
}

/// Limits for the per-set dispense commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispenseConfig {
    /// Codes sent when the caller gives no amount.
    pub default_amount: u32,
    /// Upper bound on codes sent per invocation.
    pub max_amount: u32,
}

/// HTTP client settings for archive downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Logging settings as they appear in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level or `EnvFilter` directive string.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json_format: bool,
    /// Optional log file; stdout when unset.
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    /// Converts the settings into the logging bootstrap's configuration.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json_format,
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}
