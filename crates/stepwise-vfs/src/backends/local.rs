//! Local filesystem backend

use crate::path;
use crate::{DirEntry, FileReader, FileSystem};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Serves a directory on disk as a virtual filesystem.
///
/// Virtual paths are resolved beneath `root`; `..` segments are resolved
/// lexically and can never escape it.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    /// Create a backend rooted at the given directory
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Root directory on disk
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the full filesystem path for a virtual path
    fn full_path(&self, virtual_path: &str) -> PathBuf {
        let cleaned = path::clean(virtual_path);
        let mut full = self.root.clone();
        full.extend(path::segments(&cleaned));
        full
    }
}

impl FileSystem for LocalFileSystem {
    fn open(&self, virtual_path: &str) -> io::Result<FileReader> {
        let full = self.full_path(virtual_path);
        if full.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("is a directory: {}", full.display()),
            ));
        }
        let file = fs::File::open(&full)?;
        Ok(Box::new(file))
    }

    fn read_dir(&self, virtual_path: &str) -> io::Result<Vec<DirEntry>> {
        let full = self.full_path(virtual_path);

        let mut entries = Vec::new();
        for entry in fs::read_dir(&full)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // follow symlinks so a linked directory is still reported as one
            let is_dir = fs::metadata(entry.path())
                .map(|metadata| metadata.is_dir())
                .unwrap_or(false);

            entries.push(if is_dir {
                DirEntry::dir(name)
            } else {
                DirEntry::file(name)
            });
        }

        tracing::trace!(path = %full.display(), entries = entries.len(), "listed local directory");
        Ok(entries)
    }
}
