//! Application command registration with Discord.

use crate::framework::{Data, Error};
use crate::table::DispatchTable;
use codedrop_config::Config;
use poise::serenity_prelude as serenity;
use tracing::info;

/// Registers the static admin commands together with one command per
/// routed set. Goes to the configured guild when there is one (updates
/// show up immediately), otherwise registers globally.
///
/// Returns the number of commands registered.
pub async fn sync_commands(
    ctx: &serenity::Context,
    commands: &[poise::Command<Data, Error>],
    table: &DispatchTable,
    config: &Config,
) -> Result<usize, serenity::Error> {
    let mut definitions = poise::builtins::create_application_commands(commands);
    definitions.extend(table.application_commands(config.dispense.max_amount));
    let count = definitions.len();

    match config.guild_id {
        Some(guild) => {
            serenity::GuildId::new(guild.0).set_commands(ctx, definitions).await?;
            info!("Synced {} command(s) to guild {}", count, guild);
        }
        None => {
            serenity::Command::set_global_commands(ctx, definitions).await?;
            info!("Synced {} global command(s)", count);
        }
    }
    Ok(count)
}
