//! Application layer for blank.
//!
//! This layer contains:
//! - **Services**: the update pipeline (`UpdateService`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! merge logic itself. All merge rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{UpdateRequest, UpdateService};

// Re-export port traits (for adapter implementation)
pub use ports::{DocumentCodec, FileReader};

pub use error::{ApplicationError, CodecError};
