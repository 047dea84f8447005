//! Gateway event routing for per-set dispense commands.

use crate::dispense::{dispense_reply, parse_amount, parse_invocation, DispenseReply};
use crate::framework::{Data, Error};
use codedrop_store::DispensedCode;
use poise::serenity_prelude as serenity;
use tracing::debug;

/// Poise event handler. Routes interactions and prefix messages that name
/// a registered set to the shared dispense logic.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::InteractionCreate { interaction } => {
            if let Some(command) = interaction.as_command() {
                handle_interaction(ctx, command, data).await?;
            }
        }
        serenity::FullEvent::Message { new_message } => {
            handle_message(ctx, new_message, data).await?;
        }
        _ => {}
    }
    Ok(())
}

async fn handle_interaction(
    ctx: &serenity::Context,
    command: &serenity::CommandInteraction,
    data: &Data,
) -> Result<(), Error> {
    let Some(name) = data.table.lookup(&command.data.name) else {
        return Ok(());
    };

    let amount = command
        .data
        .options
        .iter()
        .find(|option| option.name == "amount")
        .and_then(|option| option.value.as_i64());

    let reply = dispense_reply(data, &name, &command.user.name, Ok(amount)).await?;
    let message = match reply {
        DispenseReply::Codes { content, files } => serenity::CreateInteractionResponseMessage::new()
            .content(content)
            .add_files(attachments(files)),
        DispenseReply::Notice(content) => serenity::CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    };

    command
        .create_response(&ctx.http, serenity::CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

async fn handle_message(ctx: &serenity::Context, msg: &serenity::Message, data: &Data) -> Result<(), Error> {
    if msg.author.bot {
        return Ok(());
    }
    let Some(invocation) = parse_invocation(&msg.content, &data.config.prefix) else {
        return Ok(());
    };
    let Some(name) = data.table.lookup(invocation.command) else {
        return Ok(());
    };

    debug!("Prefix dispense of {} by {}", name, msg.author.name);
    let requested = parse_amount(invocation.amount);
    match dispense_reply(data, &name, &msg.author.name, requested).await? {
        DispenseReply::Codes { content, files } => {
            let message = serenity::CreateMessage::new()
                .content(content)
                .add_files(attachments(files));
            msg.channel_id.send_message(&ctx.http, message).await?;
        }
        // Prefix replies cannot be ephemeral.
        DispenseReply::Notice(content) => {
            msg.reply(&ctx.http, content).await?;
        }
    }
    Ok(())
}

fn attachments(files: Vec<DispensedCode>) -> Vec<serenity::CreateAttachment> {
    files
        .into_iter()
        .map(|code| serenity::CreateAttachment::bytes(code.data, code.file_name))
        .collect()
}
