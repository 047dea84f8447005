//! Main entry point for the codedrop bot.

use anyhow::Context;
use codedrop_bot::CodeDropBot;
use codedrop_common::init_logging;
use codedrop_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("Failed to load settings")?;

    let _log_guard = init_logging(&config.logging.to_logging_config())
        .context("Failed to initialize logging")?;

    info!("Starting codedrop {}", env!("CARGO_PKG_VERSION"));

    let bot = CodeDropBot::new(config).context("Failed to open inventory")?;

    if let Err(e) = bot.start().await {
        error!("Bot stopped with error: {}", e);
        return Err(e.into());
    }

    info!("Bot stopped");
    Ok(())
}
