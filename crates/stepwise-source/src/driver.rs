//! The contract a migration runner drives sources through

use std::fmt;
use std::io::{self, Read};

use stepwise_vfs::FileReader;

use crate::error::SourceResult;

/// Content of one migration step, plus its identifier.
///
/// The reader is owned by the caller and closed when dropped.
pub struct MigrationReader {
    identifier: String,
    reader: FileReader,
}

impl MigrationReader {
    pub fn new(identifier: impl Into<String>, reader: FileReader) -> Self {
        Self {
            identifier: identifier.into(),
            reader,
        }
    }

    /// Human-readable migration label, e.g. `create_users`
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Split into the raw reader and the identifier
    pub fn into_parts(self) -> (FileReader, String) {
        (self.reader, self.identifier)
    }

    /// Read the whole body as UTF-8
    pub fn into_string(mut self) -> io::Result<String> {
        let mut body = String::new();
        self.reader.read_to_string(&mut body)?;
        Ok(body)
    }
}

impl Read for MigrationReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for MigrationReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationReader")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

/// Ordered, read-only access to a set of migrations.
///
/// Navigation and reads that find nothing fail with
/// [`SourceError::NotFound`](crate::SourceError::NotFound); check
/// [`is_not_found`](crate::SourceError::is_not_found) to tell that apart
/// from a backend failure.
pub trait Driver: Send + Sync {
    /// Open a new source from a URL
    fn open(&self, url: &str) -> SourceResult<Box<dyn Driver>>;

    /// First version
    fn first(&self) -> SourceResult<u64>;

    /// Version before `version`
    fn prev(&self, version: u64) -> SourceResult<u64>;

    /// Version after `version`
    fn next(&self, version: u64) -> SourceResult<u64>;

    /// Content of the up migration at `version`
    fn read_up(&self, version: u64) -> SourceResult<MigrationReader>;

    /// Content of the down migration at `version`
    fn read_down(&self, version: u64) -> SourceResult<MigrationReader>;

    /// Release the source and everything it holds
    fn close(self: Box<Self>) -> SourceResult<()>;
}
