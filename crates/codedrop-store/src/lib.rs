//! # Codedrop Store
//!
//! Directory-backed code inventory and set registry for the codedrop bot.
//!
//! Each code set is a directory under the storage root holding available
//! images, with a `used/` subdirectory for images already handed out. The
//! list of known sets is a JSON array persisted with atomic replace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod fetcher;
pub mod inventory;
pub mod locks;
pub mod registry;

pub use archive::{extract_images, sanitize_entry_name, MAX_EXTRACTED_BYTES};
pub use fetcher::{ArchiveSource, HttpArchiveFetcher};
pub use inventory::{DispensedCode, Inventory, SetStats, USED_DIR};
pub use locks::SetLocks;
pub use registry::Registry;

#[cfg(any(test, feature = "testing"))]
pub use fetcher::MockArchiveSource;
