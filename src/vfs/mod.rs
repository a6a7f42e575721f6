/*!
 * Virtual File System Module
 * Pluggable backends for the filesystem primitives temp allocation relies on
 */

pub mod local;
pub mod memory;
pub mod traits;
pub mod types;

// Re-exports
pub use local::LocalFS;
pub use memory::MemFS;
pub use traits::{FileSystem, OpenFile};
pub use types::{FileType, VfsError, VfsResult};
