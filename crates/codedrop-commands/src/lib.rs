//! # Codedrop Commands
//!
//! Discord command implementations using Poise for the codedrop bot.
//!
//! Admin commands (`add`, `upload`, `delete`, `purge`, `purge_used`,
//! `stats`) are ordinary Poise commands. Each registered code set also gets
//! its own dispense command; those change at runtime, so they live in a
//! [`DispatchTable`] and are routed from the raw gateway events instead of
//! the Poise command list.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod admin;
pub mod dispense;
pub mod events;
pub mod framework;
pub mod replies;
pub mod stats;
pub mod sync;
pub mod table;

pub use admin::{add_reply, delete_reply, purge_reply, purge_used_reply, upload_reply};
pub use dispense::{dispense_reply, parse_amount, parse_invocation, resolve_amount, DispenseReply, Invocation};
pub use framework::*;
pub use sync::sync_commands;
pub use table::DispatchTable;
