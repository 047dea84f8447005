//! # Codedrop Bot
//!
//! Discord bot that hands out pre-stocked code images from named sets.
//!
//! This is the main binary crate that wires the settings, the on-disk
//! inventory and the Poise framework together and runs the gateway client.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;

pub use bot::*;
pub use error::*;
