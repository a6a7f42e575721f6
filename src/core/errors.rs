/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A tracked path that could not be removed during cleanup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl CleanupFailure {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by allocation, tracking and cleanup
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum TempError {
    #[error("Invalid request: {0}")]
    #[diagnostic(
        code(temp::invalid_request),
        help("Prefix and suffix must be plain name fragments; dir must be a non-empty path.")
    )]
    InvalidRequest(String),

    #[error("Could not find a free name after {attempts} attempts")]
    #[diagnostic(
        code(temp::exhausted_retries),
        help("Every candidate name collided. Check the entropy source or clear the directory.")
    )]
    ExhaustedRetries { attempts: u32 },

    #[error("Failed to create {}: {}", path.display(), cause)]
    #[diagnostic(
        code(temp::creation_failed),
        help("Check that the parent directory exists and is writable.")
    )]
    CreationFailed { path: PathBuf, cause: String },

    #[error("Cleanup requested but tracking is not enabled")]
    #[diagnostic(
        code(temp::no_tracking),
        help("Call track() before allocating resources that cleanup() should remove.")
    )]
    NoTrackingEnabled,

    #[error("Cleanup removed {} path(s) but failed on {}", succeeded.len(), failed.len())]
    #[diagnostic(
        code(temp::partial_cleanup),
        help("Failed paths remain tracked; fix the cause and call cleanup() again.")
    )]
    PartialCleanupFailure {
        succeeded: Vec<PathBuf>,
        failed: Vec<CleanupFailure>,
    },

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(temp::configuration_error),
        help("Invalid configuration. Review TEMP_TRACKER_* environment variables.")
    )]
    Configuration(String),

    #[error("Task aborted: {0}")]
    #[diagnostic(
        code(temp::task_aborted),
        help("The async runtime shut down before the operation completed.")
    )]
    TaskAborted(String),
}

impl TempError {
    /// Whether this error left tracked paths behind for a retry
    pub fn has_remaining_paths(&self) -> bool {
        matches!(self, TempError::PartialCleanupFailure { failed, .. } if !failed.is_empty())
    }
}

/// Result type for temp operations
///
/// # Must Use
/// Allocation and cleanup can fail and must be handled to avoid leaking files
pub type Result<T> = std::result::Result<T, TempError>;
