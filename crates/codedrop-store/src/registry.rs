//! Persistent list of registered code sets.
//!
//! The registry file is a JSON array of set names, e.g. `["nike","adidas"]`.
//! It is always rewritten whole: the new contents go to a temporary file in
//! the same directory which is then renamed over the old one, so a crash
//! leaves either the previous or the next document, never a truncated one.

use codedrop_common::{Result, SetName};
use parking_lot::RwLock;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Reads the registry document, creating it as `[]` if it does not exist.
pub fn load(path: &Path) -> Result<Vec<SetName>> {
    if !path.exists() {
        info!("Registry {} not found, initializing empty registry", path.display());
        save(path, &[])?;
        return Ok(Vec::new());
    }

    let content = fs::read(path)?;
    let parsed: Vec<SetName> = serde_json::from_slice(&content)?;

    let mut names = Vec::with_capacity(parsed.len());
    for name in parsed {
        if names.contains(&name) {
            warn!("Ignoring duplicate registry entry `{}`", name);
        } else {
            names.push(name);
        }
    }
    Ok(names)
}

/// Atomically replaces the registry document with `names`, in order.
pub fn save(path: &Path, names: &[SetName]) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory)?;

    let mut staged = NamedTempFile::new_in(directory)?;
    serde_json::to_writer(&mut staged, names)?;
    staged.flush()?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;

    debug!("Persisted {} registry entries to {}", names.len(), path.display());
    Ok(())
}

/// In-memory registry backed by its JSON document.
///
/// All mutations go through the write lock and are persisted before the
/// lock is released. A failed write rolls the in-memory list back.
#[derive(Debug)]
pub struct Registry {
    path: PathBuf,
    names: RwLock<Vec<SetName>>,
}

impl Registry {
    /// Opens the registry at `path`, creating an empty document if absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let names = load(&path)?;
        info!("Loaded {} code set(s) from {}", names.len(), path.display());

        Ok(Self {
            path,
            names: RwLock::new(names),
        })
    }

    /// Snapshot of the registered names in registry order.
    pub fn names(&self) -> Vec<SetName> {
        self.names.read().clone()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &SetName) -> bool {
        self.names.read().contains(name)
    }

    /// Number of registered sets.
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    /// Whether no sets are registered.
    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }

    /// Appends `name` and persists. Returns `false` if it was already present.
    pub fn insert(&self, name: SetName) -> Result<bool> {
        let mut names = self.names.write();
        if names.contains(&name) {
            return Ok(false);
        }

        names.push(name);
        if let Err(e) = save(&self.path, &names) {
            names.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// Removes `name` and persists. Returns `false` if it was not present.
    pub fn remove(&self, name: &SetName) -> Result<bool> {
        let mut names = self.names.write();
        let Some(index) = names.iter().position(|n| n == name) else {
            return Ok(false);
        };

        let removed = names.remove(index);
        if let Err(e) = save(&self.path, &names) {
            names.insert(index, removed);
            return Err(e);
        }
        Ok(true)
    }
}
