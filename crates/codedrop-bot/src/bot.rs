//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use codedrop_commands::{create_framework, intents, sync_commands, Data, DispatchTable};
use codedrop_config::Config;
use codedrop_store::{ArchiveSource, HttpArchiveFetcher, Inventory};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Main bot structure.
pub struct CodeDropBot {
    config: Arc<Config>,
    inventory: Arc<Inventory>,
    archives: Arc<dyn ArchiveSource>,
}

impl CodeDropBot {
    /// Opens the inventory described by `config` and prepares the archive
    /// downloader. Directories of registered sets are recreated if missing.
    pub fn new(config: Config) -> BotResult<Self> {
        let inventory = Inventory::open(&config.storage.base_dir, &config.storage.registry_file)?;
        info!(
            "Inventory at {} with {} registered set(s)",
            inventory.base_dir().display(),
            inventory.registry().len()
        );

        let archives = HttpArchiveFetcher::new(Duration::from_secs(config.http.timeout_seconds))?;

        Ok(Self {
            config: Arc::new(config),
            inventory: Arc::new(inventory),
            archives: Arc::new(archives),
        })
    }

    /// The opened inventory.
    pub fn inventory(&self) -> &Arc<Inventory> {
        &self.inventory
    }

    /// Builds the shared command data with the dispatch table populated from
    /// the registry.
    pub fn data(&self) -> Data {
        let table = DispatchTable::from_names(&self.inventory.registry().names());
        Data {
            config: Arc::clone(&self.config),
            inventory: Arc::clone(&self.inventory),
            table: Arc::new(table),
            archives: Arc::clone(&self.archives),
        }
    }

    /// Starts the bot and runs until the gateway connection ends or the
    /// process receives Ctrl-C.
    pub async fn start(&self) -> BotResult<()> {
        let data = self.data();

        let framework = create_framework(&self.config.prefix)
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Connected as {}", ready.user.name);
                    sync_commands(ctx, &framework.options().commands, &data.table, &data.config).await?;
                    Ok(data)
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(&self.config.bot_token, intents())
            .framework(framework)
            .await?;

        let shard_manager = Arc::clone(&client.shard_manager);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl-C, shutting down");
                    shard_manager.shutdown_all().await;
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            }
        });

        client.start().await?;
        Ok(())
    }
}
