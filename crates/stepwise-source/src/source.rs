//! Migration source bound to a virtual filesystem

use std::fmt;

use stepwise_vfs::{path, FileSystem};

use crate::config::SourceConfig;
use crate::driver::{Driver, MigrationReader};
use crate::error::{Query, SourceError, SourceResult};
use crate::loader;
use crate::migration::Direction;
use crate::migrations::Migrations;

/// A [`Driver`] serving migrations from one directory of a [`FileSystem`].
///
/// The directory is listed once, when the source is bound. File contents
/// are opened lazily on [`read_up`](Driver::read_up) and
/// [`read_down`](Driver::read_down).
pub struct VfsSource<F: FileSystem> {
    fs: F,
    path: String,
    migrations: Migrations,
}

impl<F: FileSystem> VfsSource<F> {
    /// Bind a filesystem and a migrations directory.
    ///
    /// An empty path means the filesystem root; relative paths are made
    /// absolute.
    pub fn with_instance(fs: F, path: &str) -> SourceResult<Self> {
        let path = loader::normalize_root(path);
        let migrations = loader::load(&fs, &path)?;

        tracing::info!(
            path = %path,
            versions = migrations.len(),
            first = ?migrations.first(),
            "bound migration source"
        );

        Ok(Self {
            fs,
            path,
            migrations,
        })
    }

    /// Bind using the directory named in `config`
    pub fn from_config(fs: F, config: &SourceConfig) -> SourceResult<Self> {
        Self::with_instance(fs, &config.migrations_path)
    }

    /// Normalized migrations directory
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn migrations(&self) -> &Migrations {
        &self.migrations
    }

    /// Release the filesystem handle and the index
    pub fn close(self) -> SourceResult<()> {
        tracing::debug!(path = %self.path, "closing migration source");
        drop(self);
        Ok(())
    }

    fn read(&self, version: u64, direction: Direction) -> SourceResult<MigrationReader> {
        let migration = self
            .migrations
            .get(version, direction)
            .ok_or_else(|| SourceError::not_found(Query::Read { version, direction }, &self.path))?;

        let file = path::join(&self.path, &migration.raw);
        tracing::trace!(file = %file, %migration, "opening migration");

        let reader = self.fs.open(&file)?;
        Ok(MigrationReader::new(migration.identifier.clone(), reader))
    }
}

impl<F: FileSystem> Driver for VfsSource<F> {
    fn open(&self, url: &str) -> SourceResult<Box<dyn Driver>> {
        tracing::debug!(url, "open by url is not supported");
        Err(SourceError::Unsupported)
    }

    fn first(&self) -> SourceResult<u64> {
        self.migrations
            .first()
            .ok_or_else(|| SourceError::not_found(Query::First, &self.path))
    }

    fn prev(&self, version: u64) -> SourceResult<u64> {
        self.migrations
            .prev(version)
            .ok_or_else(|| SourceError::not_found(Query::Prev(version), &self.path))
    }

    fn next(&self, version: u64) -> SourceResult<u64> {
        self.migrations
            .next(version)
            .ok_or_else(|| SourceError::not_found(Query::Next(version), &self.path))
    }

    fn read_up(&self, version: u64) -> SourceResult<MigrationReader> {
        self.read(version, Direction::Up)
    }

    fn read_down(&self, version: u64) -> SourceResult<MigrationReader> {
        self.read(version, Direction::Down)
    }

    fn close(self: Box<Self>) -> SourceResult<()> {
        VfsSource::close(*self)
    }
}

impl<F: FileSystem> fmt::Debug for VfsSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VfsSource")
            .field("path", &self.path)
            .field("migrations", &self.migrations)
            .finish_non_exhaustive()
    }
}
