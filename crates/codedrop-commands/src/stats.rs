//! Stats command implementation.

use crate::framework::{respond, Context, Error};
use crate::replies;

/// Shows how many codes each set has left.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn stats(ctx: Context<'_>) -> Result<(), Error> {
    let outcome = ctx
        .data()
        .store(codedrop_store::Inventory::stats)
        .await
        .map(|stats| replies::stats(&stats));
    respond(ctx, outcome).await
}
