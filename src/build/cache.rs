//! Modification-time index for the change poller.
//!
//! Remembers the last modification time seen for every watched file. It only
//! ever grows or moves forward and lives for a single process run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Path -> last observed modification time.
#[derive(Debug, Default)]
pub struct ModTimeIndex {
    entries: HashMap<PathBuf, SystemTime>,
}

impl ModTimeIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a modification time for `path`.
    ///
    /// Returns true if the path was not seen before or `modified` is newer
    /// than the stored time. An older or equal time leaves the entry alone.
    pub fn observe(&mut self, path: &Path, modified: SystemTime) -> bool {
        match self.entries.get(path) {
            Some(seen) if modified <= *seen => false,
            _ => {
                self.entries.insert(path.to_path_buf(), modified);
                true
            }
        }
    }

    /// The stored modification time for `path`, if any.
    #[cfg(test)]
    pub fn get(&self, path: &Path) -> Option<SystemTime> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
