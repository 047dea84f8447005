//! Per-set mutual exclusion.

use codedrop_common::SetName;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// One mutex per code set, created on first use.
///
/// Operations that list and then move or delete files in a set hold that
/// set's lock for their whole duration so two of them cannot pick the same
/// file. Entries outlive deleted sets, so a name always maps to the same
/// mutex.
#[derive(Debug, Default)]
pub struct SetLocks {
    locks: DashMap<SetName, Arc<Mutex<()>>>,
}

impl SetLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `name`, creating it if needed.
    pub fn handle(&self, name: &SetName) -> Arc<Mutex<()>> {
        self.locks.entry(name.clone()).or_default().clone()
    }

    /// Number of sets that currently have a lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no lock entries exist.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
