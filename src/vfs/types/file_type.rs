/*!
 * VFS File Type Enum
 * Type of an on-disk object as seen by a non-following probe
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// File type reported by [`FileSystem::file_type`](crate::vfs::FileSystem::file_type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    File,
    Directory,
    Symlink,
    Unknown,
}

impl FileType {
    /// Whether removal needs the recursive strategy
    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self, FileType::Directory)
    }
}

impl Default for FileType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileType::File => write!(f, "file"),
            FileType::Directory => write!(f, "directory"),
            FileType::Symlink => write!(f, "symlink"),
            FileType::Unknown => write!(f, "unknown"),
        }
    }
}
