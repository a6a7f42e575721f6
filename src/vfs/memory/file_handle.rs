/*!
 * File Handle Implementation
 * In-memory file handle for read/write operations
 */

use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use super::super::traits::OpenFile;
use super::super::types::*;
use super::node::Node;
use super::MemFS;

/// In-memory file handle, written back to the node on sync and drop
pub(super) struct MemFile {
    pub fs: MemFS,
    pub path: PathBuf,
    pub cursor: Cursor<Vec<u8>>,
}

impl Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.cursor.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Seek for MemFile {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl OpenFile for MemFile {
    fn sync(&mut self) -> VfsResult<()> {
        let data = self.cursor.get_ref().clone();
        let new_size = data.len();

        // The file may have been removed underneath an open handle
        match self.fs.nodes.get_mut(&self.path) {
            Some(mut node) => {
                let old_size = node.size();
                if new_size > old_size {
                    self.fs.check_and_reserve_space(new_size - old_size)?;
                } else {
                    self.fs.release_space(old_size - new_size);
                }
                *node = Node::File { data };
                Ok(())
            }
            None => Err(VfsError::NotFound(self.path.display().to_string())),
        }
    }

    fn size(&self) -> VfsResult<u64> {
        Ok(self.cursor.get_ref().len() as u64)
    }

    fn set_len(&mut self, size: u64) -> VfsResult<()> {
        self.cursor.get_mut().resize(size as usize, 0);
        Ok(())
    }
}

impl Drop for MemFile {
    fn drop(&mut self) {
        // Auto-sync on drop; a removed file simply discards the buffer
        let _ = self.sync();
    }
}
