//! Directory-backed code inventory.
//!
//! Layout under the storage root:
//!
//! ```text
//! <base_dir>/<set>/*.{png,jpg,jpeg,gif}   available codes
//! <base_dir>/<set>/used/*                 codes already handed out
//! ```
//!
//! The [`Registry`] is authoritative: operations on an unregistered name
//! fail with `NotFound`, and a registered set whose directory has gone
//! missing is recreated on access.
//!
//! Every per-set operation takes the set's lock before it checks the
//! registry or touches the directory, so a `delete_set` is never
//! interleaved with another operation on the same set.

use crate::archive;
use crate::locks::SetLocks;
use crate::registry::Registry;
use codedrop_common::{has_image_extension, DropError, Result, SetName};
use parking_lot::Mutex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Name of the per-set subdirectory holding dispensed codes.
pub const USED_DIR: &str = "used";

/// A code moved to `used/` by [`Inventory::dispense`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispensedCode {
    /// File name of the code image.
    pub file_name: String,
    /// Image contents, read from its new location.
    pub data: Vec<u8>,
}

/// Remaining codes for one set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetStats {
    /// Set name.
    pub name: SetName,
    /// Number of available codes.
    pub available: usize,
}

/// Code sets on disk plus the registry that names them.
#[derive(Debug)]
pub struct Inventory {
    base_dir: PathBuf,
    registry: Registry,
    locks: SetLocks,
    rng: Mutex<fastrand::Rng>,
}

impl Inventory {
    /// Opens the inventory rooted at `base_dir` with its registry document
    /// at `registry_file`, recreating directories for registered sets.
    pub fn open(base_dir: impl Into<PathBuf>, registry_file: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;

        let inventory = Self {
            base_dir,
            registry: Registry::open(registry_file)?,
            locks: SetLocks::new(),
            rng: Mutex::new(fastrand::Rng::new()),
        };
        inventory.reconcile()?;
        Ok(inventory)
    }

    /// Replaces the sampling RNG with a seeded one.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.lock() = fastrand::Rng::with_seed(seed);
        self
    }

    /// The storage root.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The set registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Directory holding a set's available codes.
    pub fn set_dir(&self, name: &SetName) -> PathBuf {
        self.base_dir.join(name.as_str())
    }

    /// Directory holding a set's used codes.
    pub fn used_dir(&self, name: &SetName) -> PathBuf {
        self.set_dir(name).join(USED_DIR)
    }

    /// Creates the set directory and its `used/` subdirectory. Idempotent.
    ///
    /// This does not touch the registry; see [`Inventory::add_set`].
    pub fn create_set(&self, name: &SetName) -> Result<PathBuf> {
        fs::create_dir_all(self.used_dir(name))?;
        Ok(self.set_dir(name))
    }

    /// Recreates missing directories for every registered set. Returns how
    /// many sets needed it.
    pub fn reconcile(&self) -> Result<usize> {
        let mut recreated = 0;
        for name in self.registry.names() {
            let lock = self.locks.handle(&name);
            let _guard = lock.lock();
            if self.registry.contains(&name) && !self.used_dir(&name).is_dir() {
                warn!("Directory for registered set `{}` is missing, recreating", name);
                self.create_set(&name)?;
                recreated += 1;
            }
        }
        Ok(recreated)
    }

    /// Registers a new set and creates its directories.
    #[instrument(skip(self), fields(set = %name))]
    pub fn add_set(&self, name: &SetName) -> Result<()> {
        let lock = self.locks.handle(name);
        let _guard = lock.lock();

        if self.registry.contains(name) {
            return Err(DropError::already_exists(name.as_str()));
        }

        self.create_set(name)?;
        if !self.registry.insert(name.clone())? {
            return Err(DropError::already_exists(name.as_str()));
        }

        info!("Added code set");
        Ok(())
    }

    /// Checks registration and makes sure the directories exist. Callers
    /// must hold the set's lock.
    fn registered_dir(&self, name: &SetName) -> Result<PathBuf> {
        if !self.registry.contains(name) {
            return Err(DropError::not_found(name.as_str()));
        }
        self.create_set(name)
    }

    /// File names of the available codes in a set. Order is unspecified.
    pub fn list_available(&self, name: &SetName) -> Result<Vec<String>> {
        let lock = self.locks.handle(name);
        let _guard = lock.lock();

        let dir = self.registered_dir(name)?;
        Ok(scan_available(&dir)?)
    }

    /// Hands out up to `count` random codes from a set, moving each into
    /// `used/` and returning its contents.
    ///
    /// Codes are drawn uniformly without replacement. Fails with
    /// `EmptyInventory` when nothing is available. All selected files are
    /// read before any is moved, and a failed move puts the already moved
    /// ones back, so an error never leaves undelivered codes in `used/`.
    #[instrument(skip(self), fields(set = %name))]
    pub fn dispense(&self, name: &SetName, count: usize) -> Result<Vec<DispensedCode>> {
        if count == 0 {
            return Err(DropError::invalid_field("Amount must be at least 1", "amount"));
        }

        let lock = self.locks.handle(name);
        let _guard = lock.lock();
        let dir = self.registered_dir(name)?;

        let mut available = scan_available(&dir)?;
        if available.is_empty() {
            return Err(DropError::empty_inventory(name.as_str()));
        }

        self.rng.lock().shuffle(&mut available);
        available.truncate(count);

        let mut dispensed = Vec::with_capacity(available.len());
        for file_name in available {
            let data = fs::read(dir.join(&file_name))?;
            dispensed.push(DispensedCode { file_name, data });
        }

        let used = dir.join(USED_DIR);
        for (moved, code) in dispensed.iter().enumerate() {
            if let Err(e) = fs::rename(dir.join(&code.file_name), used.join(&code.file_name)) {
                warn!("Failed to move {} to used: {}", code.file_name, e);
                restore(&dir, &used, &dispensed[..moved]);
                return Err(e.into());
            }
        }

        info!("Dispensed {} code(s)", dispensed.len());
        Ok(dispensed)
    }

    /// Deletes every available code in a set. Used codes are left alone.
    #[instrument(skip(self), fields(set = %name))]
    pub fn purge_unused(&self, name: &SetName) -> Result<usize> {
        let lock = self.locks.handle(name);
        let _guard = lock.lock();
        let dir = self.registered_dir(name)?;

        let available = scan_available(&dir)?;
        for file_name in &available {
            fs::remove_file(dir.join(file_name))?;
        }

        info!("Purged {} unused code(s)", available.len());
        Ok(available.len())
    }

    /// Deletes every regular file under each registered set's `used/`.
    pub fn purge_used_all(&self) -> Result<usize> {
        let mut total = 0;
        for name in self.registry.names() {
            let lock = self.locks.handle(&name);
            let _guard = lock.lock();

            let used = self.used_dir(&name);
            if !self.registry.contains(&name) || !used.is_dir() {
                continue;
            }
            for file in regular_files(&used)? {
                fs::remove_file(file)?;
                total += 1;
            }
        }

        info!("Purged {} used code(s) across all sets", total);
        Ok(total)
    }

    /// Removes a set's directory tree and unregisters it.
    ///
    /// Filesystem removal is best effort; failures are logged and the set
    /// is unregistered regardless.
    #[instrument(skip(self), fields(set = %name))]
    pub fn delete_set(&self, name: &SetName) -> Result<()> {
        let lock = self.locks.handle(name);
        let _guard = lock.lock();

        if !self.registry.contains(name) {
            return Err(DropError::not_found(name.as_str()));
        }

        if let Err(e) = fs::remove_dir_all(self.set_dir(name)) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to remove set directory: {}", e);
            }
        }
        self.registry.remove(name)?;

        info!("Deleted code set");
        Ok(())
    }

    /// Extracts the images of a ZIP archive into a set. Returns the number
    /// of images written.
    #[instrument(skip(self, zip_bytes), fields(set = %name, bytes = zip_bytes.len()))]
    pub fn ingest_zip(&self, name: &SetName, zip_bytes: &[u8]) -> Result<usize> {
        let lock = self.locks.handle(name);
        let _guard = lock.lock();
        let dir = self.registered_dir(name)?;

        archive::extract_images(zip_bytes, &dir)
    }

    /// Available-code counts for every registered set, in registry order.
    pub fn stats(&self) -> Result<Vec<SetStats>> {
        let mut stats = Vec::new();
        for name in self.registry.names() {
            let lock = self.locks.handle(&name);
            let _guard = lock.lock();
            if !self.registry.contains(&name) {
                continue;
            }

            let dir = self.create_set(&name)?;
            let available = scan_available(&dir)?.len();
            stats.push(SetStats { name, available });
        }
        Ok(stats)
    }
}

fn scan_available(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(file_name) = entry.file_name().into_string() else {
            debug!("Skipping non UTF-8 file name in {}", dir.display());
            continue;
        };
        if has_image_extension(&file_name) && entry.path().is_file() {
            names.push(file_name);
        }
    }
    Ok(names)
}

fn restore(dir: &Path, used: &Path, moved: &[DispensedCode]) {
    for code in moved {
        if let Err(e) = fs::rename(used.join(&code.file_name), dir.join(&code.file_name)) {
            warn!("Failed to return {} to the available pool: {}", code.file_name, e);
        }
    }
}

fn regular_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
