/*!
 * Temp Tracker Library
 * Unique temp files and directories with opt-in tracking and bulk cleanup
 */

pub mod api;
pub mod core;
pub mod monitoring;
pub mod temp;
pub mod vfs;

// Re-exports
pub use api::AsyncTemp;
pub use crate::core::{CleanupFailure, Result, TempConfig, TempError};
pub use monitoring::init_tracing;
pub use temp::{
    CleanupReport, ResourceHandle, ResourceKind, ResourceRequest, TempManager,
    TempManagerBuilder, TrackingRegistry,
};
pub use vfs::{FileSystem, LocalFS, MemFS, OpenFile};
