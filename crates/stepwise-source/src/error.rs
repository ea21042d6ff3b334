//! Error types for migration sources

use std::fmt;
use std::io;
use thiserror::Error;

use crate::migration::Direction;

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// A filename that is not a migration file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a migration filename: {0}")]
    NoMatch(String),

    #[error("migration version does not fit in 64 bits: {0}")]
    VersionOutOfRange(String),

    #[error("unknown migration direction: {0}")]
    UnknownDirection(String),
}

/// The lookup that found nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    First,
    Prev(u64),
    Next(u64),
    Read { version: u64, direction: Direction },
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::First => write!(f, "first"),
            Query::Prev(version) => write!(f, "prev for version {}", version),
            Query::Next(version) => write!(f, "next for version {}", version),
            Query::Read { version, direction } => {
                write!(f, "read {} for version {}", direction, version)
            }
        }
    }
}

/// Migration source errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// A navigation or read query has no matching migration
    #[error("{query} {path}: no such migration")]
    NotFound { query: Query, path: String },

    /// Two files resolve to the same version and direction
    #[error("duplicate {direction} migration for version {version} in {path}: {file}")]
    Duplicate {
        path: String,
        file: String,
        version: u64,
        direction: Direction,
    },

    /// The underlying filesystem failed
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("open() is not supported by this source, bind a filesystem with VfsSource::with_instance instead")]
    Unsupported,
}

impl SourceError {
    pub(crate) fn not_found(query: Query, path: &str) -> Self {
        SourceError::NotFound {
            query,
            path: path.to_string(),
        }
    }

    /// Whether this is an expected "no such migration" outcome rather than a
    /// real failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}
