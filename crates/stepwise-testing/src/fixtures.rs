//! Reference migration layouts
//!
//! The standard layout has gaps and versions with only one direction:
//!
//! | version | up | down |
//! |---------|----|------|
//! | 1       | x  | x    |
//! | 3       | x  |      |
//! | 4       | x  | x    |
//! | 5       |    | x    |
//! | 7       | x  | x    |
//!
//! plus a `README.md` and a nested directory that must be ignored.

use std::fs;
use std::io;
use std::path::Path;

use stepwise_source::Direction;
use stepwise_vfs::MemoryFileSystem;

/// Directory the standard layout lives in
pub const STANDARD_ROOT: &str = "/migrations";

/// Identifier shared by every standard migration
pub const STANDARD_IDENTIFIER: &str = "foobar";

/// Migration files of the standard layout
pub const STANDARD_MIGRATIONS: &[(u64, Direction)] = &[
    (1, Direction::Up),
    (1, Direction::Down),
    (3, Direction::Up),
    (4, Direction::Up),
    (4, Direction::Down),
    (5, Direction::Down),
    (7, Direction::Up),
    (7, Direction::Down),
];

const README: &str = "README.md";
const NESTED: &str = "archive/2_foobar.up.sql";

/// Filename of a standard migration
pub fn filename(version: u64, direction: Direction) -> String {
    format!("{}_{}.{}.sql", version, STANDARD_IDENTIFIER, direction)
}

/// File body of a standard migration
pub fn body(version: u64, direction: Direction) -> String {
    format!("-- {} migration {}\nSELECT {};\n", direction, version, version)
}

/// The standard layout in memory, under [`STANDARD_ROOT`]
pub fn standard() -> MemoryFileSystem {
    let mut fs = MemoryFileSystem::new();
    for (version, direction) in STANDARD_MIGRATIONS {
        fs.insert(
            &format!("{}/{}", STANDARD_ROOT, filename(*version, *direction)),
            body(*version, *direction),
        );
    }
    fs.insert(&format!("{}/{}", STANDARD_ROOT, README), "not a migration");
    fs.insert(&format!("{}/{}", STANDARD_ROOT, NESTED), "SELECT 2;");
    fs
}

/// Write the standard layout into `dir` on disk
pub fn write_standard(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir.join("archive"))?;
    for (version, direction) in STANDARD_MIGRATIONS {
        fs::write(
            dir.join(filename(*version, *direction)),
            body(*version, *direction),
        )?;
    }
    fs::write(dir.join(README), "not a migration")?;
    fs::write(dir.join(NESTED), "SELECT 2;")?;
    Ok(())
}

/// An in-memory layout from `(filename, body)` pairs under `root`
pub fn layout(root: &str, files: &[(&str, &str)]) -> MemoryFileSystem {
    let mut fs = MemoryFileSystem::new().with_dir(root);
    for (name, contents) in files {
        fs.insert(&format!("{}/{}", root, name), *contents);
    }
    fs
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_vfs::{DirEntry, FileSystem};

    #[test]
    fn test_standard_layout_listing() {
        let entries = standard().read_dir(STANDARD_ROOT).unwrap();
        assert_eq!(entries.len(), STANDARD_MIGRATIONS.len() + 2);
        assert!(entries.contains(&DirEntry::dir("archive")));
        assert!(entries.contains(&DirEntry::file("5_foobar.down.sql")));
        assert!(!entries.contains(&DirEntry::file("5_foobar.up.sql")));
    }

    #[test]
    fn test_layout_keeps_empty_root() {
        let fs = layout("/empty", &[]);
        assert!(fs.read_dir("/empty").unwrap().is_empty());
    }

    #[test]
    fn test_filename_and_body() {
        assert_eq!(filename(3, Direction::Up), "3_foobar.up.sql");
        assert_eq!(body(3, Direction::Down), "-- down migration 3\nSELECT 3;\n");
    }
}
