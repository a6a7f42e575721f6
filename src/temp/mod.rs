/*!
 * Temp Resource Module
 * Unique temp file/directory allocation with opt-in tracking and bulk cleanup
 */

pub mod cleanup;
pub mod factory;
pub mod manager;
pub mod manager_builder;
pub mod naming;
pub mod registry;
pub mod types;

// Re-exports
pub use cleanup::CleanupEngine;
pub use factory::ResourceFactory;
pub use manager::TempManager;
pub use manager_builder::TempManagerBuilder;
pub use naming::{NameGenerator, RandomTokens, TokenSource};
pub use registry::TrackingRegistry;
pub use types::{CleanupReport, ResourceHandle, ResourceKind, ResourceRequest};
