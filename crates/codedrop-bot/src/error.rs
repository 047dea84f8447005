//! Application-wide error types using thiserror.

use codedrop_common::DropError;
use codedrop_config::ConfigError;
use poise::serenity_prelude as serenity;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Settings could not be loaded or are invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Inventory or registry failure during startup.
    #[error("Storage error: {0}")]
    Store(#[from] DropError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
