/*!
 * Tracking Registry
 * Set of allocated paths owned by cleanup, guarded by the tracking flag
 */

use ahash::RandomState;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default)]
struct TrackingState {
    enabled: bool,
    paths: HashSet<PathBuf, RandomState>,
}

/// Registry of tracked temp paths
///
/// Every operation takes the same lock, so callers never observe a
/// half-applied update. The lock only guards in-memory set operations;
/// no filesystem I/O happens while it is held.
#[derive(Debug, Default)]
pub struct TrackingRegistry {
    state: Mutex<TrackingState>,
}

impl TrackingRegistry {
    /// Create a registry with tracking disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with tracking already enabled
    pub fn enabled() -> Self {
        let registry = Self::new();
        registry.set_tracking(true);
        registry
    }

    /// Set the tracking flag and return the previous value
    ///
    /// Disabling drops every tracked path; enabling only affects future
    /// allocations.
    pub fn set_tracking(&self, enabled: bool) -> bool {
        let mut state = self.state.lock();
        let previous = state.enabled;
        state.enabled = enabled;

        if previous && !enabled {
            let dropped = state.paths.len();
            state.paths.clear();
            debug!(dropped, "Tracking disabled, registry cleared");
        }
        previous
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    /// Track `path`; returns false when tracking is off or it was already tracked
    pub fn record(&self, path: &Path) -> bool {
        let mut state = self.state.lock();
        if !state.enabled {
            return false;
        }
        state.paths.insert(path.to_path_buf())
    }

    /// Stop tracking `path`
    pub fn forget(&self, path: &Path) -> bool {
        self.state.lock().paths.remove(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.state.lock().paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.state.lock().paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted copy of the tracked paths
    pub fn snapshot(&self) -> Vec<PathBuf> {
        let state = self.state.lock();
        Self::sorted(&state.paths)
    }

    /// Flag and snapshot read under one lock: `None` when tracking is off
    pub fn tracked_snapshot(&self) -> Option<Vec<PathBuf>> {
        let state = self.state.lock();
        state.enabled.then(|| Self::sorted(&state.paths))
    }

    fn sorted(paths: &HashSet<PathBuf, RandomState>) -> Vec<PathBuf> {
        let mut snapshot: Vec<PathBuf> = paths.iter().cloned().collect();
        snapshot.sort();
        snapshot
    }
}
