//! Directory loader
//!
//! Lists the direct children of a root directory and indexes every entry
//! whose name follows the migration filename convention.

use stepwise_vfs::path::SEPARATOR;
use stepwise_vfs::FileSystem;

use crate::error::{SourceError, SourceResult};
use crate::migration::Migration;
use crate::migrations::Migrations;

/// Make a root path absolute.
///
/// Empty means the filesystem root, anything not starting with `/` gets one
/// prepended, absolute paths are kept verbatim.
pub fn normalize_root(path: &str) -> String {
    if path.is_empty() {
        SEPARATOR.to_string()
    } else if !path.starts_with(SEPARATOR) {
        format!("{}{}", SEPARATOR, path)
    } else {
        path.to_string()
    }
}

/// Build an index from the entries of `root`.
///
/// Directories and files that are not migrations are skipped. Two files with
/// the same version and direction abort the load.
pub fn load<F>(fs: &F, root: &str) -> SourceResult<Migrations>
where
    F: FileSystem + ?Sized,
{
    let entries = fs.read_dir(root)?;
    let mut migrations = Migrations::new();
    let mut skipped = 0usize;

    for entry in entries {
        if entry.is_dir() {
            continue;
        }

        let migration = match Migration::parse(entry.name()) {
            Ok(migration) => migration,
            Err(err) => {
                tracing::debug!(path = %root, file = entry.name(), error = %err, "skipping non-migration file");
                skipped += 1;
                continue;
            }
        };

        let (version, direction) = (migration.version, migration.direction);
        if !migrations.append(migration) {
            return Err(SourceError::Duplicate {
                path: root.to_string(),
                file: entry.name().to_string(),
                version,
                direction,
            });
        }
    }

    tracing::debug!(
        path = %root,
        versions = migrations.len(),
        skipped,
        "indexed migrations"
    );
    Ok(migrations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::Direction;
    use stepwise_vfs::{DirEntry, FileReader, MemoryFileSystem};
    use std::io;

    /// Lists a fixed set of entries in the given order
    struct FixedListing(Vec<DirEntry>);

    impl FileSystem for FixedListing {
        fn open(&self, path: &str) -> io::Result<FileReader> {
            Err(io::Error::new(io::ErrorKind::NotFound, path.to_string()))
        }

        fn read_dir(&self, _path: &str) -> io::Result<Vec<DirEntry>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_root(""), "/");
        assert_eq!(normalize_root("migrations"), "/migrations");
        assert_eq!(normalize_root("./migrations"), "/./migrations");
        assert_eq!(normalize_root("/db/migrations"), "/db/migrations");
        assert_eq!(normalize_root("/"), "/");
    }

    #[test]
    fn test_load_skips_directories_and_unparsable_names() {
        let fs = FixedListing(vec![
            DirEntry::file("README.md"),
            DirEntry::dir("2_looks_like.up.sql"),
            DirEntry::file("1_init.up.sql"),
            DirEntry::file(".gitkeep"),
        ]);

        let migrations = load(&fs, "/").unwrap();
        assert_eq!(migrations.versions().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_load_orders_regardless_of_listing_order() {
        let fs = FixedListing(vec![
            DirEntry::file("30_c.up.sql"),
            DirEntry::file("4_b.down.sql"),
            DirEntry::file("100_d.up.sql"),
            DirEntry::file("1_a.up.sql"),
        ]);

        let migrations = load(&fs, "/").unwrap();
        assert_eq!(migrations.versions().collect::<Vec<_>>(), vec![1, 4, 30, 100]);
    }

    #[test]
    fn test_load_rejects_duplicates() {
        let fs = FixedListing(vec![
            DirEntry::file("1_init.up.sql"),
            DirEntry::file("01_again.up.sql"),
        ]);

        match load(&fs, "/migrations") {
            Err(SourceError::Duplicate {
                path,
                file,
                version,
                direction,
            }) => {
                assert_eq!(path, "/migrations");
                assert_eq!(file, "01_again.up.sql");
                assert_eq!(version, 1);
                assert_eq!(direction, Direction::Up);
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_propagates_listing_errors() {
        let fs = MemoryFileSystem::new();
        let err = load(&fs, "/missing").unwrap_err();
        match err {
            SourceError::Io(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::NotFound),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
