//! Code set administration commands.
//!
//! All of these are guild-only and require the Manage Server permission.
//! Each command is a thin wrapper over a `*_reply` function that takes
//! only [`Data`], so the command logic runs without a Discord context.

use crate::framework::{respond, respond_with, Context, Data, Error};
use crate::replies;
use crate::sync::sync_commands;
use codedrop_common::{has_zip_extension, DropError, SetName};
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

/// Creates a new code set with its own dispense command.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Name of the new code set"] name: String,
) -> Result<(), Error> {
    let outcome = add_reply(ctx.data(), &name).await;
    if outcome.is_ok() {
        info!("{} added code set {}", ctx.author().name, name);
        resync(ctx).await;
    }
    respond(ctx, outcome).await
}

/// Registers a set and refreshes the dispatch table.
pub async fn add_reply(data: &Data, raw: &str) -> Result<String, DropError> {
    let name = SetName::parse(raw)?;
    let set = name.clone();
    data.store(move |inventory| inventory.add_set(&set)).await?;
    data.refresh_table();
    Ok(replies::added(&name))
}

/// Uploads a ZIP of code images into a set.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn upload(
    ctx: Context<'_>,
    #[description = "Code set to upload into"] name: String,
    #[description = "ZIP archive of images"] file: Option<serenity::Attachment>,
) -> Result<(), Error> {
    // The deferral is public, so the reply that follows cannot be ephemeral.
    ctx.defer().await?;
    let archive = file.as_ref().map(|file| (file.filename.as_str(), file.url.as_str()));
    let outcome = upload_reply(ctx.data(), &name, archive).await;
    if let Ok(content) = &outcome {
        info!("{} uploaded to {}: {}", ctx.author().name, name, content);
    }
    respond_with(ctx, outcome, false).await
}

/// Downloads an archive given as `(file name, url)` and ingests its images
/// into a registered set.
pub async fn upload_reply(data: &Data, raw: &str, archive: Option<(&str, &str)>) -> Result<String, DropError> {
    let Some((file_name, url)) = archive else {
        return Err(DropError::invalid_field(replies::MISSING_ATTACHMENT, "attachment"));
    };
    let name = SetName::parse(raw)?;

    if !data.inventory.registry().contains(&name) {
        return Err(DropError::invalid_field(replies::upload_unknown_set(&name), "name"));
    }
    if !has_zip_extension(file_name) {
        return Err(DropError::invalid_field(replies::NOT_A_ZIP, "attachment"));
    }

    let bytes = data.archives.fetch(url).await?;
    let set = name.clone();
    let count = data.store(move |inventory| inventory.ingest_zip(&set, &bytes)).await?;
    Ok(replies::uploaded(count, &name))
}

/// Deletes a code set, its files and its command.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn delete(
    ctx: Context<'_>,
    #[description = "Code set to delete"] name: String,
) -> Result<(), Error> {
    let outcome = delete_reply(ctx.data(), &name).await;
    if outcome.is_ok() {
        info!("{} deleted code set {}", ctx.author().name, name);
        resync(ctx).await;
    }
    respond(ctx, outcome).await
}

/// Deletes a set and refreshes the dispatch table.
pub async fn delete_reply(data: &Data, raw: &str) -> Result<String, DropError> {
    let name = SetName::parse(raw)?;
    let set = name.clone();
    data.store(move |inventory| inventory.delete_set(&set)).await?;
    data.refresh_table();
    Ok(replies::deleted(&name))
}

/// Deletes every unsent code in a set.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn purge(
    ctx: Context<'_>,
    #[description = "Code set to purge"] name: String,
) -> Result<(), Error> {
    let outcome = purge_reply(ctx.data(), &name).await;
    if outcome.is_ok() {
        info!("{} purged unsent codes from {}", ctx.author().name, name);
    }
    respond(ctx, outcome).await
}

/// Deletes the available codes of one set.
pub async fn purge_reply(data: &Data, raw: &str) -> Result<String, DropError> {
    let name = SetName::parse(raw)?;
    let set = name.clone();
    let count = data.store(move |inventory| inventory.purge_unused(&set)).await?;
    Ok(replies::purged(count, &name))
}

/// Deletes every used code in every set.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn purge_used(ctx: Context<'_>) -> Result<(), Error> {
    let outcome = purge_used_reply(ctx.data()).await;
    respond(ctx, outcome).await
}

/// Deletes the used codes of every set.
pub async fn purge_used_reply(data: &Data) -> Result<String, DropError> {
    data.store(codedrop_store::Inventory::purge_used_all)
        .await
        .map(replies::purged_used)
}

/// Re-registers application commands from the current dispatch table.
/// Registration failures are logged; the set change itself already happened.
async fn resync(ctx: Context<'_>) {
    let data = ctx.data();
    let commands = &ctx.framework().options().commands;
    if let Err(e) = sync_commands(ctx.serenity_context(), commands, &data.table, &data.config).await {
        warn!("Failed to sync application commands: {}", e);
    }
}
