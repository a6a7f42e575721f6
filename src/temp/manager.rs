/*!
 * Temp Manager
 * Blocking entry point composing naming, creation, tracking and cleanup
 */

use super::cleanup::CleanupEngine;
use super::factory::ResourceFactory;
use super::manager_builder::TempManagerBuilder;
use super::registry::TrackingRegistry;
use super::types::{CleanupReport, ResourceHandle, ResourceKind, ResourceRequest};
use crate::core::errors::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Temp resource manager
///
/// Cheap to clone; clones share one [`TrackingRegistry`], so tracking
/// state is common to every allocation site holding a clone.
#[derive(Debug, Clone)]
pub struct TempManager {
    pub(super) registry: Arc<TrackingRegistry>,
    pub(super) factory: ResourceFactory,
    pub(super) cleanup: CleanupEngine,
}

impl TempManager {
    /// Manager over the host filesystem with default configuration
    pub fn new() -> Self {
        Self::builder().assemble()
    }

    pub fn builder() -> TempManagerBuilder {
        TempManagerBuilder::new()
    }

    /// Enable or disable tracking; disabling forgets every tracked path
    pub fn track(&self, enabled: bool) {
        let previous = self.registry.set_tracking(enabled);
        if previous != enabled {
            info!(enabled, "Temp tracking toggled");
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.registry.is_enabled()
    }

    /// Create a temp file opened for read/write
    pub fn open<R: Into<ResourceRequest>>(&self, request: R) -> Result<ResourceHandle> {
        self.factory.create_file(&request.into())
    }

    /// Create a temp directory and return its path
    pub fn mkdir<R: Into<ResourceRequest>>(&self, request: R) -> Result<PathBuf> {
        self.factory
            .create_directory(&request.into())
            .map(|handle| handle.path)
    }

    /// Generate a temp file name without creating or tracking it
    pub fn path<R: Into<ResourceRequest>>(&self, request: R) -> Result<PathBuf> {
        self.factory.candidate(&request.into(), ResourceKind::File)
    }

    /// Remove every tracked resource
    pub fn cleanup(&self) -> Result<CleanupReport> {
        self.cleanup.cleanup()
    }

    /// Sorted snapshot of currently tracked paths
    pub fn tracked_paths(&self) -> Vec<PathBuf> {
        self.registry.snapshot()
    }

    /// Registry shared by this manager and its clones
    pub fn registry(&self) -> &Arc<TrackingRegistry> {
        &self.registry
    }
}

impl Default for TempManager {
    fn default() -> Self {
        Self::new()
    }
}
