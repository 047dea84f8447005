//! # Codedrop Common
//!
//! Shared types, errors, and logging for the codedrop bot.
//!
//! This crate provides the foundational types used across all other crates
//! in the workspace: the error taxonomy, the validated [`SetName`] newtype,
//! the image-file filter, and the tracing bootstrap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use logging::{init_logging, LogGuard, LoggingConfig};
pub use types::*;
pub use utils::*;
