//! Default values for every settings section.

use crate::schema::*;
use std::path::PathBuf;

/// Default prefix for message commands.
pub const DEFAULT_PREFIX: &str = "!";

/// Default number of codes per dispense.
pub const DEFAULT_AMOUNT: u32 = 5;

/// Discord rejects messages with more than ten attachments.
pub const MAX_ATTACHMENTS_PER_MESSAGE: u32 = 10;

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            guild_id: None,
            prefix: DEFAULT_PREFIX.to_string(),
            storage: StorageConfig::default(),
            dispense: DispenseConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("codes"),
            registry_file: PathBuf::from("commands.json"),
        }
    }
}

impl Default for DispenseConfig {
    fn default() -> Self {
        Self {
            default_amount: DEFAULT_AMOUNT,
            max_amount: MAX_ATTACHMENTS_PER_MESSAGE,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: 30 }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file: None,
        }
    }
}
