/*!
 * Resource Factory
 * Exclusive creation of temp files and directories with collision retry
 */

use super::naming::NameGenerator;
use super::registry::TrackingRegistry;
use super::types::{ResourceHandle, ResourceKind, ResourceRequest};
use crate::core::errors::{Result, TempError};
use crate::vfs::{FileSystem, VfsError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Creates uniquely named resources and registers them for cleanup
#[derive(Clone)]
pub struct ResourceFactory {
    fs: Arc<dyn FileSystem>,
    names: NameGenerator,
    registry: Arc<TrackingRegistry>,
    max_attempts: u32,
}

impl ResourceFactory {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        names: NameGenerator,
        registry: Arc<TrackingRegistry>,
        max_attempts: u32,
    ) -> Self {
        Self {
            fs,
            names,
            registry,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Create a temp file and return it opened for read/write
    pub fn create_file(&self, request: &ResourceRequest) -> Result<ResourceHandle> {
        self.create_with(request, ResourceKind::File, |fs, path| {
            fs.create_file(path)
                .map(|fd| ResourceHandle::file(path.to_path_buf(), fd))
        })
    }

    /// Create a temp directory
    pub fn create_directory(&self, request: &ResourceRequest) -> Result<ResourceHandle> {
        self.create_with(request, ResourceKind::Directory, |fs, path| {
            fs.create_dir(path)
                .map(|()| ResourceHandle::directory(path.to_path_buf()))
        })
    }

    /// Generate a name without creating anything
    pub fn candidate(&self, request: &ResourceRequest, kind: ResourceKind) -> Result<PathBuf> {
        request.validate()?;
        Ok(self.names.generate(request, kind))
    }

    fn create_with<F>(
        &self,
        request: &ResourceRequest,
        kind: ResourceKind,
        create: F,
    ) -> Result<ResourceHandle>
    where
        F: Fn(&dyn FileSystem, &Path) -> std::result::Result<ResourceHandle, VfsError>,
    {
        request.validate()?;

        for attempt in 1..=self.max_attempts {
            let path = self.names.generate(request, kind);

            match create(self.fs.as_ref(), &path) {
                Ok(handle) => {
                    // Register before the caller can observe the handle
                    let tracked = self.registry.record(&handle.path);
                    debug!(
                        path = %handle.path.display(),
                        %kind,
                        attempt,
                        tracked,
                        "Allocated temp resource"
                    );
                    return Ok(handle);
                }
                Err(e) if e.is_collision() => {
                    debug!(path = %path.display(), attempt, "Temp name collision, retrying");
                }
                Err(e) => {
                    warn!(path = %path.display(), %kind, error = %e, "Temp creation failed");
                    return Err(TempError::CreationFailed {
                        path,
                        cause: e.to_string(),
                    });
                }
            }
        }

        Err(TempError::ExhaustedRetries {
            attempts: self.max_attempts,
        })
    }
}

impl std::fmt::Debug for ResourceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceFactory")
            .field("fs", &self.fs.name())
            .field("names", &self.names)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}
