//! Per-set dispense command shared by the slash and prefix surfaces.

use crate::framework::Data;
use crate::replies;
use codedrop_common::{DropError, SetName};
use codedrop_config::DispenseConfig;
use codedrop_store::DispensedCode;
use tracing::{debug, info};

/// What to send back for one dispense invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispenseReply {
    /// Public message with the codes attached.
    Codes {
        /// Caption naming the user and set.
        content: String,
        /// Dispensed files, already moved to `used/`.
        files: Vec<DispensedCode>,
    },
    /// Private notice; nothing was dispensed.
    Notice(String),
}

/// Prefix message split into command and argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Command name without the prefix.
    pub command: &'a str,
    /// Raw amount argument, if any.
    pub amount: Option<&'a str>,
}

/// Splits `!name [amount]`. Returns `None` when `content` does not start
/// with `prefix` or names no command.
pub fn parse_invocation<'a>(content: &'a str, prefix: &str) -> Option<Invocation<'a>> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let mut parts = rest.split_whitespace();
    let command = parts.next()?;
    Some(Invocation {
        command,
        amount: parts.next(),
    })
}

/// Applies the configured default and clamps to the configured maximum.
pub fn resolve_amount(requested: Option<i64>, config: &DispenseConfig) -> Result<usize, DropError> {
    let requested = requested.unwrap_or_else(|| i64::from(config.default_amount));
    if requested < 1 {
        return Err(DropError::invalid_field("Amount must be at least 1.", "amount"));
    }

    let clamped = requested.min(i64::from(config.max_amount));
    usize::try_from(clamped).map_err(|_| DropError::invalid_field("Amount is out of range.", "amount"))
}

/// Parses the raw prefix argument into an amount.
pub fn parse_amount(raw: Option<&str>) -> Result<Option<i64>, DropError> {
    raw.map(|value| {
        value
            .parse::<i64>()
            .map_err(|_| DropError::invalid_field("Amount must be a whole number.", "amount"))
    })
    .transpose()
}

/// Dispenses codes from `name` for `user` and builds the reply.
///
/// User-facing failures become a [`DispenseReply::Notice`]; anything else is
/// returned as an error.
pub async fn dispense_reply(
    data: &Data,
    name: &SetName,
    user: &str,
    requested: Result<Option<i64>, DropError>,
) -> Result<DispenseReply, DropError> {
    let outcome = match requested.and_then(|amount| resolve_amount(amount, &data.config.dispense)) {
        Ok(count) => {
            let set = name.clone();
            data.store(move |inventory| inventory.dispense(&set, count)).await
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(files) => {
            info!("{} received {} code(s) from {}", user, files.len(), name);
            Ok(DispenseReply::Codes {
                content: replies::dispensed(user, name, files.len()),
                files,
            })
        }
        Err(e) if e.is_user_facing() => {
            debug!("Dispense from {} refused: {}", name, e);
            Ok(DispenseReply::Notice(replies::error_message(&e)))
        }
        Err(e) => Err(e),
    }
}
