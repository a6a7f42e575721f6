/*!
 * Filesystem Node Types
 * Internal representation of files and directories
 */

use super::super::types::FileType;

/// In-memory filesystem node
#[derive(Debug, Clone)]
pub(in crate::vfs) enum Node {
    File { data: Vec<u8> },
    Directory,
}

impl Node {
    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory)
    }

    pub fn file_type(&self) -> FileType {
        match self {
            Node::File { .. } => FileType::File,
            Node::Directory => FileType::Directory,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Node::File { data } => data.len(),
            Node::Directory => 0,
        }
    }
}
