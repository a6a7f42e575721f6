/*!
 * VFS Traits
 * Filesystem primitives consumed by the temp allocation and cleanup engine
 */

use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use super::types::*;

/// Filesystem primitive trait
///
/// Paths are used as given: relative paths resolve against the process
/// working directory, absolute paths are taken verbatim. Creation
/// primitives are exclusive and must report `VfsError::AlreadyExists`
/// rather than overwrite.
pub trait FileSystem: Send + Sync {
    /// Create a new file exclusively and return an open read/write handle
    fn create_file(&self, path: &Path) -> VfsResult<Box<dyn OpenFile>>;

    /// Create a single directory exclusively (parents must exist)
    fn create_dir(&self, path: &Path) -> VfsResult<()>;

    /// Unlink a file or symlink
    fn delete(&self, path: &Path) -> VfsResult<()>;

    /// Remove directory recursively
    fn remove_dir_all(&self, path: &Path) -> VfsResult<()>;

    /// Check if file/directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Probe the type of `path` without following symlinks
    fn file_type(&self, path: &Path) -> VfsResult<FileType>;

    /// Directory used when a request does not name one
    fn temp_root(&self) -> PathBuf;

    /// Get filesystem name/type
    fn name(&self) -> &str;
}

/// Open file handle trait
///
/// Represents an open file with read/write/seek capabilities.
/// Automatically closed when dropped.
pub trait OpenFile: Read + Write + Seek + Send + Sync {
    /// Sync file data to storage
    fn sync(&mut self) -> VfsResult<()>;

    /// Current size in bytes
    fn size(&self) -> VfsResult<u64>;

    /// Set file length
    fn set_len(&mut self, size: u64) -> VfsResult<()>;
}
