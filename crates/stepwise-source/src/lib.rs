//! # stepwise-source
//!
//! Indexes a directory of versioned `up`/`down` migration files exposed
//! through a read-only virtual filesystem, and walks them in version order.
//!
//! Files follow `<version>_<identifier>.<up|down>.<extension>`, for example
//! `003_create_users.up.sql`. Other files in the directory are ignored.
//! Nothing here executes a migration; a runner uses the [`Driver`] contract
//! to find out what to run and to read it.
//!
//! ## Quick Start
//!
//! ```rust
//! use stepwise_source::{Driver, VfsSource};
//! use stepwise_vfs::MemoryFileSystem;
//!
//! let fs = MemoryFileSystem::new()
//!     .with_file("/migrations/1_init.up.sql", "CREATE TABLE users (id INT);")
//!     .with_file("/migrations/1_init.down.sql", "DROP TABLE users;")
//!     .with_file("/migrations/2_add_email.up.sql", "ALTER TABLE users ADD email TEXT;");
//!
//! let source = VfsSource::with_instance(fs, "/migrations").unwrap();
//!
//! assert_eq!(source.first().unwrap(), 1);
//! assert_eq!(source.next(1).unwrap(), 2);
//! assert!(source.next(2).unwrap_err().is_not_found());
//!
//! let up = source.read_up(2).unwrap();
//! assert_eq!(up.identifier(), "add_email");
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod loader;
pub mod logging;
pub mod migration;
pub mod migrations;
pub mod source;

pub use config::{ConfigError, ConfigSource, EnvConfig, SourceConfig};
pub use driver::{Driver, MigrationReader};
pub use error::{ParseError, Query, SourceError, SourceResult};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use migration::{parse, Direction, Migration};
pub use migrations::Migrations;
pub use source::VfsSource;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Direction, Driver, Migration, MigrationReader, Migrations, SourceError, SourceResult,
        VfsSource,
    };
    pub use stepwise_vfs::{FileSystem, LocalFileSystem, MemoryFileSystem};
}
