//! # stepwise-vfs
//!
//! A minimal, read-only filesystem capability used by stepwise migration
//! sources, plus the backends that ship with it.
//!
//! ## Features
//!
//! - **Capability trait**: [`FileSystem`] exposes exactly two operations,
//!   opening a path for reading and listing a directory
//! - **In-memory backend**: [`MemoryFileSystem`] for embedded migration sets
//!   and tests
//! - **Local backend**: [`LocalFileSystem`] serves a directory on disk
//! - **Handle pass-through**: `&T`, `Box<T>` and `Arc<T>` are filesystems too
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Read;
//! use stepwise_vfs::{FileSystem, MemoryFileSystem};
//!
//! let fs = MemoryFileSystem::new()
//!     .with_file("/migrations/1_init.up.sql", "CREATE TABLE users (id INT);");
//!
//! let entries = fs.read_dir("/migrations").unwrap();
//! assert_eq!(entries[0].name(), "1_init.up.sql");
//!
//! let mut sql = String::new();
//! fs.open("/migrations/1_init.up.sql")
//!     .unwrap()
//!     .read_to_string(&mut sql)
//!     .unwrap();
//! assert!(sql.starts_with("CREATE TABLE"));
//! ```

use std::io::{self, Read};
use std::sync::Arc;

pub mod backends;
pub mod path;

pub use backends::*;

/// Readable content handle returned by [`FileSystem::open`].
///
/// The caller owns the handle; dropping it releases the underlying resource.
pub type FileReader = Box<dyn Read + Send>;

/// A single directory entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirEntry {
    name: String,
    is_dir: bool,
}

impl DirEntry {
    /// Create an entry for a regular file
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    /// Create an entry for a directory
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    /// Base name of the entry, without any parent path
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the entry is a directory
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// Read-only filesystem capability.
///
/// Paths are `/`-separated and interpreted relative to the backend's own
/// root. Implementations make no promise about the order of
/// [`read_dir`](FileSystem::read_dir) results.
pub trait FileSystem: Send + Sync {
    /// Open a file for reading
    fn open(&self, path: &str) -> io::Result<FileReader>;

    /// List the direct children of a directory
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn open(&self, path: &str) -> io::Result<FileReader> {
        (**self).open(path)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Box<T> {
    fn open(&self, path: &str) -> io::Result<FileReader> {
        (**self).open(path)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Arc<T> {
    fn open(&self, path: &str) -> io::Result<FileReader> {
        (**self).open(path)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_entry_constructors() {
        let file = DirEntry::file("1_init.up.sql");
        assert_eq!(file.name(), "1_init.up.sql");
        assert!(!file.is_dir());

        let dir = DirEntry::dir("nested");
        assert_eq!(dir.name(), "nested");
        assert!(dir.is_dir());
    }

    #[test]
    fn test_handles_delegate_to_inner_filesystem() {
        let fs = MemoryFileSystem::new().with_file("/a/1_x.up.sql", "select 1;");

        let shared: Arc<dyn FileSystem> = Arc::new(fs.clone());
        assert_eq!(shared.read_dir("/a").unwrap().len(), 1);

        let boxed: Box<dyn FileSystem> = Box::new(fs.clone());
        assert!(boxed.open("/a/1_x.up.sql").is_ok());

        let borrowed = &fs;
        assert!(FileSystem::open(&borrowed, "/a/missing.sql").is_err());
    }
}
