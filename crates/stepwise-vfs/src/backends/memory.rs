//! In-memory filesystem backend

use crate::path::{self, SEPARATOR};
use crate::{DirEntry, FileReader, FileSystem};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor};
use std::sync::Arc;

/// In-memory filesystem backed by a sorted map of file contents.
///
/// Directories are implied by the files beneath them; empty directories can
/// be declared with [`with_dir`](MemoryFileSystem::with_dir). Cloning is
/// cheap, file contents are shared.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<String, Arc<[u8]>>,
    dirs: BTreeSet<String>,
}

impl MemoryFileSystem {
    /// Create an empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Declare a directory, even if it stays empty
    pub fn with_dir(mut self, path: &str) -> Self {
        self.dirs.insert(path::clean(path));
        self
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        let contents: Vec<u8> = contents.into();
        self.files.insert(path::clean(path), Arc::from(contents));
    }

    /// Number of files held
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files are held
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn is_dir(&self, path: &str) -> bool {
        if path == "/" || self.dirs.contains(path) {
            return true;
        }
        let prefix = format!("{}{}", path, SEPARATOR);
        self.files.keys().any(|file| file.starts_with(&prefix))
            || self.dirs.iter().any(|dir| dir.starts_with(&prefix))
    }
}

impl FileSystem for MemoryFileSystem {
    fn open(&self, path: &str) -> io::Result<FileReader> {
        let path = path::clean(path);
        match self.files.get(&path) {
            Some(contents) => Ok(Box::new(Cursor::new(Arc::clone(contents)))),
            None if self.is_dir(&path) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("is a directory: {}", path),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path),
            )),
        }
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let path = path::clean(path);

        if self.files.contains_key(&path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a directory: {}", path),
            ));
        }
        if !self.is_dir(&path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {}", path),
            ));
        }

        let depth = path::segments(&path).count();
        let mut children: BTreeMap<&str, bool> = BTreeMap::new();

        let descendants = self
            .files
            .keys()
            .map(|file| (file, false))
            .chain(self.dirs.iter().map(|dir| (dir, true)));

        for (candidate, declared_dir) in descendants {
            if !is_descendant(&path, candidate) {
                continue;
            }
            let mut rest = path::segments(candidate).skip(depth);
            if let Some(name) = rest.next() {
                let is_dir = declared_dir || rest.next().is_some();
                *children.entry(name).or_insert(false) |= is_dir;
            }
        }

        tracing::trace!(path = %path, entries = children.len(), "listed in-memory directory");

        Ok(children
            .into_iter()
            .map(|(name, is_dir)| {
                if is_dir {
                    DirEntry::dir(name)
                } else {
                    DirEntry::file(name)
                }
            })
            .collect())
    }
}

fn is_descendant(dir: &str, candidate: &str) -> bool {
    if dir == "/" {
        return candidate != "/";
    }
    candidate
        .strip_prefix(dir)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn create_test_fs() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("/migrations/1_init.up.sql", "CREATE TABLE users (id INT);")
            .with_file("/migrations/1_init.down.sql", "DROP TABLE users;")
            .with_file("/migrations/nested/readme.txt", "not a migration")
            .with_file("/top.txt", "top")
            .with_dir("/empty")
    }

    #[test]
    fn test_open_reads_contents() {
        let fs = create_test_fs();

        let mut contents = String::new();
        fs.open("/migrations/1_init.down.sql")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "DROP TABLE users;");
    }

    #[test]
    fn test_open_cleans_path() {
        let fs = create_test_fs();
        assert!(fs.open("/./migrations//1_init.up.sql").is_ok());
        assert!(fs.open("migrations/1_init.up.sql").is_ok());
    }

    #[test]
    fn test_open_missing_and_directory() {
        let fs = create_test_fs();

        let err = fs.open("/migrations/9_nope.up.sql").err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let err = fs.open("/migrations").err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_read_dir_lists_direct_children() {
        let fs = create_test_fs();

        let entries = fs.read_dir("/migrations").unwrap();
        assert_eq!(
            entries,
            vec![
                DirEntry::file("1_init.down.sql"),
                DirEntry::file("1_init.up.sql"),
                DirEntry::dir("nested"),
            ]
        );
    }

    #[test]
    fn test_read_dir_root() {
        let fs = create_test_fs();

        let entries = fs.read_dir("/").unwrap();
        assert_eq!(
            entries,
            vec![
                DirEntry::dir("empty"),
                DirEntry::dir("migrations"),
                DirEntry::file("top.txt"),
            ]
        );
        assert_eq!(fs.read_dir("").unwrap(), entries);
    }

    #[test]
    fn test_read_dir_empty_and_missing() {
        let fs = create_test_fs();

        assert!(fs.read_dir("/empty").unwrap().is_empty());
        assert!(MemoryFileSystem::new().read_dir("/").unwrap().is_empty());

        let err = fs.read_dir("/missing").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let err = fs.read_dir("/top.txt").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_similar_prefix_is_not_a_child() {
        let fs = MemoryFileSystem::new()
            .with_file("/migrations/1_a.up.sql", "")
            .with_file("/migrations_old/1_a.up.sql", "");

        let entries = fs.read_dir("/migrations").unwrap();
        assert_eq!(entries, vec![DirEntry::file("1_a.up.sql")]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut fs = MemoryFileSystem::new();
        assert!(fs.is_empty());

        fs.insert("/a.sql", "one");
        fs.insert("/a.sql", "two");
        assert_eq!(fs.len(), 1);

        let mut contents = String::new();
        fs.open("/a.sql").unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "two");
    }
}
