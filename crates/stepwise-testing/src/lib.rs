//! # stepwise-testing
//!
//! Test fixtures and a conformance suite for stepwise migration sources.
//!
//! ```rust
//! use stepwise_source::VfsSource;
//! use stepwise_testing::{conformance, fixtures};
//!
//! let source = VfsSource::with_instance(fixtures::standard(), fixtures::STANDARD_ROOT).unwrap();
//! conformance::run(&source).unwrap();
//! ```

pub mod conformance;
pub mod fixtures;

use stepwise_source::SourceError;

#[derive(thiserror::Error, Debug)]
pub enum TestError {
    #[error("Assertion failed: {message}")]
    Assertion { message: String },

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TestResult<T> = Result<T, TestError>;

pub(crate) fn assertion(message: impl Into<String>) -> TestError {
    TestError::Assertion {
        message: message.into(),
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{conformance, fixtures, TestError, TestResult};
    pub use stepwise_source::prelude::*;
}
