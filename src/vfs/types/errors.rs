/*!
 * VFS Error Types
 * Structured errors returned by backend filesystem primitives
 */

use serde::{Deserialize, Deserializer, Serialize};
use std::io::ErrorKind;
use thiserror::Error;

/// VFS operation result
pub type VfsResult<T> = Result<T, VfsError>;

/// Errors raised by [`FileSystem`](crate::vfs::FileSystem) implementations
///
/// `AlreadyExists` and `NotFound` carry meaning for callers: the first
/// signals a name collision, the second an already-removed path.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum VfsError {
    #[error("Not found: {0}")]
    NotFound(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Already exists: {0}")]
    AlreadyExists(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Permission denied: {0}")]
    PermissionDenied(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Not a directory: {0}")]
    NotADirectory(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Invalid path: {0}")]
    InvalidPath(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("I/O error: {0}")]
    IoError(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Out of space")]
    OutOfSpace,
}

impl VfsError {
    /// Map a host I/O error onto the VFS taxonomy as `"<context>: <os error>"`
    pub fn from_io(e: std::io::Error, context: impl Into<String>) -> Self {
        let message = format!("{}: {}", context.into(), e);
        match e.kind() {
            ErrorKind::NotFound => VfsError::NotFound(message),
            ErrorKind::PermissionDenied => VfsError::PermissionDenied(message),
            ErrorKind::AlreadyExists => VfsError::AlreadyExists(message),
            _ => VfsError::IoError(message),
        }
    }

    #[inline]
    pub fn is_collision(&self) -> bool {
        matches!(self, VfsError::AlreadyExists(_))
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound(_))
    }
}

/// Deserialize and validate non-empty string for error messages
pub(super) fn deserialize_nonempty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        return Err(serde::de::Error::custom("error message must not be empty"));
    }
    Ok(s)
}
