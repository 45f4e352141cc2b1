//! Infrastructure adapters for blank.
//!
//! This crate implements the ports defined in `blank-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod codec;
pub mod filesystem;
pub mod makefile;

// Re-export commonly used adapters
pub use codec::SerdeCodec;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use makefile::find_makefile;
