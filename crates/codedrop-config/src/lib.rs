//! # Codedrop Config
//!
//! Settings loading and validation for the codedrop bot.
//!
//! Settings are read once at startup from a JSON, YAML or TOML file,
//! overridden by environment variables, and validated before the bot
//! connects.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
