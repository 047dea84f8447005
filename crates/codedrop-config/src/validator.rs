//! Runtime validation of loaded settings.

use crate::defaults::MAX_ATTACHMENTS_PER_MESSAGE;
use crate::loader::ConfigError;
use crate::schema::Config;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every problem at once.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let problems = Self::problems(config);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems.join("; ")))
        }
    }

    fn problems(config: &Config) -> Vec<String> {
        let mut problems = Vec::new();

        if config.bot_token.trim().is_empty() {
            problems.push("bot_token cannot be empty".to_string());
        }

        if config.prefix.is_empty() || config.prefix.chars().any(char::is_whitespace) {
            problems.push("prefix must be non-empty and contain no whitespace".to_string());
        }

        if config.storage.base_dir.as_os_str().is_empty() {
            problems.push("storage.base_dir cannot be empty".to_string());
        }
        if config.storage.registry_file.file_name().is_none() {
            problems.push("storage.registry_file must name a file".to_string());
        }

        let dispense = &config.dispense;
        if dispense.max_amount == 0 || dispense.max_amount > MAX_ATTACHMENTS_PER_MESSAGE {
            problems.push(format!(
                "dispense.max_amount must be between 1 and {MAX_ATTACHMENTS_PER_MESSAGE}"
            ));
        }
        if dispense.default_amount == 0 || dispense.default_amount > dispense.max_amount {
            problems.push("dispense.default_amount must be between 1 and dispense.max_amount".to_string());
        }

        if config.http.timeout_seconds == 0 {
            problems.push("http.timeout_seconds must be positive".to_string());
        }

        problems
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}
