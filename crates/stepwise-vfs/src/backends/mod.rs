//! Filesystem backend implementations

pub mod local;
pub mod memory;

pub use local::*;
pub use memory::*;
