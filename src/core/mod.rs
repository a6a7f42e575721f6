/*!
 * Core Module
 * Shared error types and configuration
 */

pub mod config;
pub mod errors;

pub use config::TempConfig;
pub use errors::{CleanupFailure, Result, TempError};
