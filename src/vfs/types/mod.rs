/*!
 * VFS Types
 * Shared types for backend filesystem primitives
 */

mod errors;
mod file_type;

pub use errors::{VfsError, VfsResult};
pub use file_type::FileType;
