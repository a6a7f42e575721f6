/*!
 * Local Filesystem Backend
 * Wraps std::fs for host filesystem access
 */

use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::traits::{FileSystem, OpenFile};
use super::types::*;

/// Owner-only permissions for created files
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Owner-only permissions for created directories
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

/// Local filesystem implementation using std::fs
#[derive(Debug, Clone)]
pub struct LocalFS {
    root: PathBuf,
}

impl LocalFS {
    /// Create local filesystem whose default temp root is `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Create local filesystem rooted at the OS temp directory
    pub fn system() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// Convert std::fs::FileType to VFS FileType
    fn convert_file_type(ft: fs::FileType) -> FileType {
        if ft.is_dir() {
            FileType::Directory
        } else if ft.is_symlink() {
            FileType::Symlink
        } else if ft.is_file() {
            FileType::File
        } else {
            FileType::Unknown
        }
    }
}

impl Default for LocalFS {
    fn default() -> Self {
        Self::system()
    }
}

impl FileSystem for LocalFS {
    fn create_file(&self, path: &Path) -> VfsResult<Box<dyn OpenFile>> {
        let mut options = fs::OpenOptions::new();
        options.read(true).write(true).create_new(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }

        let file = options
            .open(path)
            .map_err(|e| VfsError::from_io(e, format!("create {}", path.display())))?;

        Ok(Box::new(LocalFile { file }))
    }

    fn create_dir(&self, path: &Path) -> VfsResult<()> {
        let mut builder = fs::DirBuilder::new();

        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIR_MODE);
        }

        builder
            .create(path)
            .map_err(|e| VfsError::from_io(e, format!("create_dir {}", path.display())))
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        fs::remove_file(path)
            .map_err(|e| VfsError::from_io(e, format!("delete {}", path.display())))
    }

    fn remove_dir_all(&self, path: &Path) -> VfsResult<()> {
        fs::remove_dir_all(path)
            .map_err(|e| VfsError::from_io(e, format!("remove_dir_all {}", path.display())))
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn file_type(&self, path: &Path) -> VfsResult<FileType> {
        let md = fs::symlink_metadata(path)
            .map_err(|e| VfsError::from_io(e, format!("metadata {}", path.display())))?;
        Ok(Self::convert_file_type(md.file_type()))
    }

    fn temp_root(&self) -> PathBuf {
        self.root.clone()
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// Local file handle
struct LocalFile {
    file: fs::File,
}

impl Read for LocalFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for LocalFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl Seek for LocalFile {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.file.seek(pos)
    }
}

impl OpenFile for LocalFile {
    fn sync(&mut self) -> VfsResult<()> {
        self.file
            .sync_all()
            .map_err(|e| VfsError::IoError(format!("sync: {}", e)))
    }

    fn size(&self) -> VfsResult<u64> {
        self.file
            .metadata()
            .map(|md| md.len())
            .map_err(|e| VfsError::IoError(format!("metadata: {}", e)))
    }

    fn set_len(&mut self, size: u64) -> VfsResult<()> {
        self.file
            .set_len(size)
            .map_err(|e| VfsError::IoError(format!("set_len: {}", e)))
    }
}
