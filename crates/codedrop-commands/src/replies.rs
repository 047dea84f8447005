//! Reply texts shown to Discord users.

use codedrop_common::{truncate_string, DropError, SetName, DISCORD_MESSAGE_LIMIT};
use codedrop_store::SetStats;
use std::fmt::Write;

/// Generic reply for failures that are not the user's to fix.
pub const INTERNAL_ERROR: &str = "❌ Something went wrong while running that command.";

/// Reply when an upload has no attachment.
pub const MISSING_ATTACHMENT: &str = "Please attach a zip file.";

/// Reply when the uploaded file is not named `*.zip`.
pub const NOT_A_ZIP: &str = "Only zip files are supported.";

/// Reply to a successful `add`.
pub fn added(name: &SetName) -> String {
    format!("Added new code set `{name}` with command `/{name}`.")
}

/// Reply to a successful `upload`.
pub fn uploaded(count: usize, name: &SetName) -> String {
    format!("✅ Uploaded `{count}` code(s) to `{name}`.")
}

/// Reply to a successful `delete`.
pub fn deleted(name: &SetName) -> String {
    format!("Deleted `{name}` and its files.")
}

/// Reply to a successful `purge`.
pub fn purged(count: usize, name: &SetName) -> String {
    format!("Purged `{count}` unsent code(s) from `{name}`.")
}

/// Reply to a successful `purge_used`.
pub fn purged_used(count: usize) -> String {
    format!("Purged `{count}` used code(s) from all sets.")
}

/// Caption for a batch of dispensed codes.
pub fn dispensed(user: &str, name: &SetName, count: usize) -> String {
    format!("📦 `{user}` used `{name}` for {count} code(s):")
}

/// Upload target that has not been added yet.
pub fn upload_unknown_set(name: &SetName) -> String {
    format!("The set `{name}` does not exist. Use `/add {name}` first.")
}

/// Renders the stats listing, one line per set in registry order.
pub fn stats(stats: &[SetStats]) -> String {
    if stats.is_empty() {
        return "No active code sets.".to_string();
    }

    let mut out = String::from("**Active Code Sets:**");
    for entry in stats {
        let _ = write!(out, "\n`{}`: {} code(s) remaining", entry.name, entry.available);
    }
    truncate_string(&out, DISCORD_MESSAGE_LIMIT)
}

/// Text for a user-facing error.
///
/// Internal errors get [`INTERNAL_ERROR`]; their details only go to the log.
pub fn error_message(error: &DropError) -> String {
    match error {
        DropError::NotFound { name } => format!("`{name}` doesn't exist."),
        DropError::AlreadyExists { name } => format!("`{name}` already exists."),
        DropError::EmptyInventory { name } => format!("No more codes left in `{name}`."),
        DropError::InvalidInput { message, field } if field.as_deref() == Some("archive") => {
            format!("❌ {message}")
        }
        DropError::InvalidInput { message, .. } | DropError::Transport { message, .. } => message.clone(),
        _ => INTERNAL_ERROR.to_string(),
    }
}
