//! Poise framework setup and command registration logic.

use crate::replies;
use crate::table::DispatchTable;
use codedrop_common::DropError;
use codedrop_config::Config;
use codedrop_store::{ArchiveSource, Inventory};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Application data accessible in all commands.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Code sets on disk.
    pub inventory: Arc<Inventory>,
    /// Per-set dispense commands currently routed.
    pub table: Arc<DispatchTable>,
    /// Downloads uploaded archives.
    pub archives: Arc<dyn ArchiveSource>,
}

impl Data {
    /// Runs a store operation on the blocking thread pool.
    pub async fn store<T, F>(&self, op: F) -> Result<T, DropError>
    where
        F: FnOnce(&Inventory) -> Result<T, DropError> + Send + 'static,
        T: Send + 'static,
    {
        let inventory = Arc::clone(&self.inventory);
        tokio::task::spawn_blocking(move || op(&inventory))
            .await
            .map_err(|e| DropError::Io(std::io::Error::other(e)))?
    }

    /// Rebuilds the dispatch table from the registry. Returns the number of
    /// routed sets.
    pub fn refresh_table(&self) -> usize {
        self.table.rebuild(&self.inventory.registry().names())
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Creates a new Poise framework.
pub fn create_framework(prefix: &str) -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: vec![
            crate::admin::add(),
            crate::admin::upload(),
            crate::admin::delete(),
            crate::admin::purge(),
            crate::admin::purge_used(),
            crate::stats::stats(),
        ],
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(prefix.to_string()),
            ..Default::default()
        },
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |ctx, event, framework, data| {
            Box::pin(crate::events::event_handler(ctx, event, framework, data))
        },
        ..Default::default()
    })
}

/// Sends the outcome of an admin command: the success text, or the
/// user-facing error text as an ephemeral reply. Internal errors are
/// returned to the framework's error handler.
pub async fn respond(ctx: Context<'_>, outcome: Result<String, DropError>) -> Result<(), Error> {
    respond_with(ctx, outcome, true).await
}

/// Like [`respond`], for commands that already deferred publicly and so
/// cannot hide their error reply.
pub async fn respond_with(
    ctx: Context<'_>,
    outcome: Result<String, DropError>,
    ephemeral_errors: bool,
) -> Result<(), Error> {
    match outcome {
        Ok(content) => {
            ctx.say(content).await?;
        }
        Err(e) if e.is_user_facing() => {
            debug!("Command {} rejected: {}", ctx.command().name, e);
            ctx.send(error_reply(&e, ephemeral_errors)).await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Reply carrying the user-facing text of `error`.
pub fn error_reply(error: &DropError, ephemeral: bool) -> poise::CreateReply {
    poise::CreateReply::default()
        .content(replies::error_message(error))
        .ephemeral(ephemeral)
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        // Per-set commands are routed by the event handler, not by Poise.
        poise::FrameworkError::UnknownInteraction { interaction, .. } => {
            debug!("Interaction `{}` left to the dispatch table", interaction.data.name);
        }
        poise::FrameworkError::UnknownCommand { msg_content, .. } => {
            debug!("Prefix message {:?} left to the dispatch table", msg_content);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command {} failed: {}", ctx.command().name, error);
            if let Err(e) = ctx.say(replies::INTERNAL_ERROR).await {
                warn!("Failed to report command error: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling framework error: {}", e);
            }
        }
    }
}

/// Builds the serenity client intents the bot needs.
pub fn intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reply_visibility_follows_flag() {
        let error = DropError::not_found("nike");

        let hidden = error_reply(&error, true);
        let public = error_reply(&error, false);

        assert_eq!(hidden.ephemeral, Some(true));
        assert_eq!(public.ephemeral, Some(false));
        assert_eq!(public.content, Some(replies::error_message(&error)));
    }
}
