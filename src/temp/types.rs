/*!
 * Temp Types
 * Requests, handles and cleanup reports
 */

use crate::core::config::fragment_problem;
use crate::core::errors::{Result, TempError};
use crate::vfs::OpenFile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of resource an allocation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    File,
    Directory,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResourceKind::File => write!(f, "file"),
            ResourceKind::Directory => write!(f, "directory"),
        }
    }
}

/// Caller-supplied decoration for a generated name
///
/// A bare string converts into a request whose prefix is that string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl ResourceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Reject decoration that would escape the target directory or cannot
    /// be represented as a path
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("prefix", &self.prefix), ("suffix", &self.suffix)] {
            let Some(value) = value.as_deref() else {
                continue;
            };
            if let Some(problem) = fragment_problem(value) {
                return Err(TempError::InvalidRequest(format!(
                    "{} {:?} {}",
                    field, value, problem
                )));
            }
        }

        if let Some(dir) = &self.dir {
            if dir.as_os_str().is_empty() {
                return Err(TempError::InvalidRequest("dir is empty".to_string()));
            }
            if dir.to_string_lossy().contains('\0') {
                return Err(TempError::InvalidRequest(
                    "dir contains a NUL byte".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl From<&str> for ResourceRequest {
    fn from(prefix: &str) -> Self {
        Self::new().prefix(prefix)
    }
}

impl From<String> for ResourceRequest {
    fn from(prefix: String) -> Self {
        Self::new().prefix(prefix)
    }
}

impl From<&ResourceRequest> for ResourceRequest {
    fn from(request: &ResourceRequest) -> Self {
        request.clone()
    }
}

/// A successfully allocated resource
///
/// The descriptor is only present for files. It belongs to the caller;
/// dropping it closes the file but leaves the file on disk.
pub struct ResourceHandle {
    pub path: PathBuf,
    pub kind: ResourceKind,
    pub descriptor: Option<Box<dyn OpenFile>>,
}

impl ResourceHandle {
    pub(crate) fn file(path: PathBuf, descriptor: Box<dyn OpenFile>) -> Self {
        Self {
            path,
            kind: ResourceKind::File,
            descriptor: Some(descriptor),
        }
    }

    pub(crate) fn directory(path: PathBuf) -> Self {
        Self {
            path,
            kind: ResourceKind::Directory,
            descriptor: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take ownership of the open descriptor, if any
    pub fn take_descriptor(&mut self) -> Option<Box<dyn OpenFile>> {
        self.descriptor.take()
    }

    /// Split into the path and the open descriptor
    pub fn into_parts(self) -> (PathBuf, Option<Box<dyn OpenFile>>) {
        (self.path, self.descriptor)
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("descriptor", &self.descriptor.is_some())
            .finish()
    }
}

/// Outcome of a successful cleanup pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    /// Paths removed by this pass
    pub removed: Vec<PathBuf>,
    /// Tracked paths that were already gone
    pub already_absent: Vec<PathBuf>,
    /// Removed non-directory entries
    pub files: usize,
    /// Removed directories
    pub dirs: usize,
}

impl CleanupReport {
    /// Nothing was tracked at snapshot time
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.already_absent.is_empty()
    }

    /// Every path this pass stopped tracking
    pub fn resolved(&self) -> impl Iterator<Item = &PathBuf> {
        self.removed.iter().chain(self.already_absent.iter())
    }
}
