/*!
 * Cleanup Engine
 * Bulk removal of tracked temp resources with aggregated failures
 */

use super::registry::TrackingRegistry;
use super::types::CleanupReport;
use crate::core::errors::{CleanupFailure, Result, TempError};
use crate::vfs::{FileSystem, FileType, VfsError};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Result of removing a single tracked path
enum Removal {
    Removed(FileType),
    Absent,
}

/// Removes every tracked path
#[derive(Clone)]
pub struct CleanupEngine {
    fs: Arc<dyn FileSystem>,
    registry: Arc<TrackingRegistry>,
}

impl CleanupEngine {
    pub fn new(fs: Arc<dyn FileSystem>, registry: Arc<TrackingRegistry>) -> Self {
        Self { fs, registry }
    }

    /// Remove all tracked paths
    ///
    /// Fails with `NoTrackingEnabled` when tracking is off. Every path is
    /// attempted; failures are collected into `PartialCleanupFailure` and
    /// stay tracked so a later call can retry just those.
    pub fn cleanup(&self) -> Result<CleanupReport> {
        let start = Instant::now();
        let snapshot = self
            .registry
            .tracked_snapshot()
            .ok_or(TempError::NoTrackingEnabled)?;

        let mut report = CleanupReport::default();
        let mut failed = Vec::new();

        for path in snapshot {
            match self.remove(&path) {
                Ok(Removal::Removed(file_type)) => {
                    self.registry.forget(&path);
                    if file_type.is_dir() {
                        report.dirs += 1;
                    } else {
                        report.files += 1;
                    }
                    report.removed.push(path);
                }
                Ok(Removal::Absent) => {
                    self.registry.forget(&path);
                    report.already_absent.push(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove tracked path");
                    failed.push(CleanupFailure::new(path, e.to_string()));
                }
            }
        }

        info!(
            files = report.files,
            dirs = report.dirs,
            absent = report.already_absent.len(),
            failed = failed.len(),
            duration_us = start.elapsed().as_micros() as u64,
            "Temp cleanup finished"
        );

        if failed.is_empty() {
            Ok(report)
        } else {
            Err(TempError::PartialCleanupFailure {
                succeeded: report.removed,
                failed,
            })
        }
    }

    /// Probe without following symlinks, then pick the removal strategy
    fn remove(&self, path: &Path) -> std::result::Result<Removal, VfsError> {
        let file_type = match self.fs.file_type(path) {
            Ok(file_type) => file_type,
            Err(e) if e.is_not_found() => return Ok(Removal::Absent),
            Err(e) => return Err(e),
        };

        let removed = if file_type.is_dir() {
            self.fs.remove_dir_all(path)
        } else {
            self.fs.delete(path)
        };

        match removed {
            Ok(()) => Ok(Removal::Removed(file_type)),
            // Raced with another remover
            Err(e) if e.is_not_found() => Ok(Removal::Absent),
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for CleanupEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupEngine")
            .field("fs", &self.fs.name())
            .field("tracked", &self.registry.len())
            .finish()
    }
}
