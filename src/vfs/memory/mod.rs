/*!
 * In-Memory Filesystem Backend
 * Fast, volatile filesystem for testing and fault injection
 */

mod file_handle;
mod node;

use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::traits::{FileSystem, OpenFile};
use super::types::*;
use file_handle::MemFile;
use node::Node;

/// Default temp root inside a fresh MemFS
pub const MEMFS_TEMP_ROOT: &str = "/tmp";

/// In-memory filesystem implementation
///
/// Clones share the same node table. Removal of individual paths can be
/// denied with [`MemFS::deny_removal`] to simulate stuck files.
#[derive(Debug, Clone)]
pub struct MemFS {
    pub(super) nodes: Arc<DashMap<PathBuf, Node, RandomState>>,
    denied: Arc<DashSet<PathBuf, RandomState>>,
    pub(super) max_size: Option<usize>,
    pub(super) current_size: Arc<AtomicUsize>,
}

impl MemFS {
    /// Create new in-memory filesystem with `/` and `/tmp`
    pub fn new() -> Self {
        let nodes = DashMap::with_hasher(RandomState::new());
        nodes.insert(PathBuf::from("/"), Node::Directory);
        nodes.insert(PathBuf::from(MEMFS_TEMP_ROOT), Node::Directory);

        Self {
            nodes: Arc::new(nodes),
            denied: Arc::new(DashSet::with_hasher(RandomState::new())),
            max_size: None,
            current_size: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create with size limit
    pub fn with_capacity(max_size: usize) -> Self {
        let mut fs = Self::new();
        fs.max_size = Some(max_size);
        fs
    }

    /// Make every removal of `path` fail with `PermissionDenied`
    pub fn deny_removal<P: AsRef<Path>>(&self, path: P) {
        self.denied.insert(self.normalize(path.as_ref()));
    }

    /// Undo [`MemFS::deny_removal`]
    pub fn allow_removal<P: AsRef<Path>>(&self, path: P) {
        self.denied.remove(&self.normalize(path.as_ref()));
    }

    /// Number of nodes below and including `/`
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Read file contents (test inspection helper)
    pub fn read(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let path = self.normalize(path);
        match self.nodes.get(&path).map(|n| n.clone()) {
            Some(Node::File { data }) => Ok(data),
            Some(Node::Directory) => Err(VfsError::InvalidPath(format!(
                "is a directory: {}",
                path.display()
            ))),
            None => Err(VfsError::NotFound(path.display().to_string())),
        }
    }

    /// Normalize path (make absolute and clean)
    pub(super) fn normalize(&self, path: &Path) -> PathBuf {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new("/").join(path)
        };

        PathBuf::from(path_clean::clean(&path))
    }

    /// Check if space is available and reserve it atomically
    pub(super) fn check_and_reserve_space(&self, additional: usize) -> VfsResult<()> {
        if let Some(max) = self.max_size {
            loop {
                let current = self.current_size.load(Ordering::SeqCst);
                if current + additional > max {
                    return Err(VfsError::OutOfSpace);
                }
                if self
                    .current_size
                    .compare_exchange(
                        current,
                        current + additional,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    )
                    .is_ok()
                {
                    break;
                }
            }
        } else {
            self.current_size.fetch_add(additional, Ordering::SeqCst);
        }
        Ok(())
    }

    /// Release previously reserved space
    pub(super) fn release_space(&self, amount: usize) {
        self.current_size.fetch_sub(amount, Ordering::SeqCst);
    }

    /// Ensure parent directory exists
    fn ensure_parent(&self, path: &Path) -> VfsResult<()> {
        if let Some(parent) = path.parent() {
            match self.nodes.get(parent) {
                Some(node) if node.is_dir() => {}
                Some(_) => return Err(VfsError::NotADirectory(parent.display().to_string())),
                None => {
                    return Err(VfsError::NotFound(format!(
                        "parent directory not found: {}",
                        parent.display()
                    )))
                }
            }
        }
        Ok(())
    }

    fn check_removal(&self, path: &Path) -> VfsResult<()> {
        if self.denied.contains(path) {
            return Err(VfsError::PermissionDenied(format!(
                "removal denied: {}",
                path.display()
            )));
        }
        Ok(())
    }

    /// Insert `node` at `path` unless something is already there
    fn insert_exclusive(&self, path: PathBuf, node: Node) -> VfsResult<()> {
        self.ensure_parent(&path)?;
        match self.nodes.entry(path) {
            Entry::Occupied(entry) => Err(VfsError::AlreadyExists(
                entry.key().display().to_string(),
            )),
            Entry::Vacant(entry) => {
                entry.insert(node);
                Ok(())
            }
        }
    }
}

impl Default for MemFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemFS {
    fn create_file(&self, path: &Path) -> VfsResult<Box<dyn OpenFile>> {
        let path = self.normalize(path);
        self.insert_exclusive(path.clone(), Node::File { data: Vec::new() })?;

        Ok(Box::new(MemFile {
            fs: self.clone(),
            path,
            cursor: Cursor::new(Vec::new()),
        }))
    }

    fn create_dir(&self, path: &Path) -> VfsResult<()> {
        let path = self.normalize(path);
        self.insert_exclusive(path, Node::Directory)
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        let path = self.normalize(path);
        self.check_removal(&path)?;

        // Bind first so the shard guard is released before removal
        let is_dir = self.nodes.get(&path).map(|n| n.is_dir());
        match is_dir {
            Some(true) => Err(VfsError::InvalidPath(format!(
                "is a directory: {}",
                path.display()
            ))),
            Some(false) => {
                if let Some((_, node)) = self.nodes.remove(&path) {
                    self.release_space(node.size());
                }
                Ok(())
            }
            None => Err(VfsError::NotFound(path.display().to_string())),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> VfsResult<()> {
        let path = self.normalize(path);

        let is_dir = self.nodes.get(&path).map(|n| n.is_dir());
        match is_dir {
            Some(true) => {}
            Some(false) => return Err(VfsError::NotADirectory(path.display().to_string())),
            None => return Err(VfsError::NotFound(path.display().to_string())),
        }

        let doomed: Vec<PathBuf> = self
            .nodes
            .iter()
            .filter(|entry| entry.key().starts_with(&path))
            .map(|entry| entry.key().clone())
            .collect();

        for candidate in &doomed {
            self.check_removal(candidate)?;
        }

        for candidate in doomed {
            if let Some((_, node)) = self.nodes.remove(&candidate) {
                self.release_space(node.size());
            }
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.contains_key(&self.normalize(path))
    }

    fn file_type(&self, path: &Path) -> VfsResult<FileType> {
        let path = self.normalize(path);
        self.nodes
            .get(&path)
            .map(|node| node.file_type())
            .ok_or_else(|| VfsError::NotFound(path.display().to_string()))
    }

    fn temp_root(&self) -> PathBuf {
        PathBuf::from(MEMFS_TEMP_ROOT)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
