//! Routing table for per-set dispense commands.
//!
//! Poise fixes its command list at startup, but sets come and go while the
//! bot runs. The table is a lock-free snapshot of the registered names that
//! the event handler consults for every interaction and prefix message, and
//! that admin commands replace wholesale after `add` and `delete`.

use arc_swap::ArcSwap;
use codedrop_common::SetName;
use poise::serenity_prelude as serenity;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Snapshot of routable set names.
#[derive(Debug, Default)]
pub struct DispatchTable {
    entries: ArcSwap<BTreeMap<String, SetName>>,
}

impl DispatchTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table routing `names`.
    pub fn from_names(names: &[SetName]) -> Self {
        let table = Self::new();
        table.rebuild(names);
        table
    }

    /// Replaces the routed names. Returns the new entry count.
    pub fn rebuild(&self, names: &[SetName]) -> usize {
        let entries: BTreeMap<String, SetName> = names
            .iter()
            .map(|name| (name.as_str().to_string(), name.clone()))
            .collect();
        let count = entries.len();
        self.entries.store(Arc::new(entries));
        debug!("Dispatch table rebuilt with {} set(s)", count);
        count
    }

    /// Resolves a command name to its set.
    pub fn lookup(&self, command: &str) -> Option<SetName> {
        self.entries.load().get(command).cloned()
    }

    /// Routed names in sorted order.
    pub fn names(&self) -> Vec<SetName> {
        self.entries.load().values().cloned().collect()
    }

    /// Number of routed sets.
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    /// Whether nothing is routed.
    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// Application command definitions for every routed set.
    pub fn application_commands(&self, max_amount: u32) -> Vec<serenity::CreateCommand> {
        self.entries
            .load()
            .keys()
            .map(|name| dispense_command(name, max_amount))
            .collect()
    }
}

fn dispense_command(name: &str, max_amount: u32) -> serenity::CreateCommand {
    serenity::CreateCommand::new(name)
        .description(format!("Send codes from {name}"))
        .add_option(
            serenity::CreateCommandOption::new(
                serenity::CommandOptionType::Integer,
                "amount",
                "Number of codes to send",
            )
            .min_int_value(1)
            .max_int_value(u64::from(max_amount))
            .required(false),
        )
}
