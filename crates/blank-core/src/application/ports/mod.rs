//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `blank-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `DocumentCodec`: bytes <-> `Document` for each supported format
//!   - `FileReader`: reading the target and `@file` fragments
//!
//! - **Driving (Input) Ports**: the CLI calls `UpdateService` directly

pub mod output;

pub use output::{DocumentCodec, FileReader};

#[cfg(test)]
pub use output::{MockDocumentCodec, MockFileReader};
