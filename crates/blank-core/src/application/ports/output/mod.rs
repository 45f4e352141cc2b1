//! Driven (output) ports - implemented by infrastructure.
//!
//! The `blank-adapters` crate provides implementations.

use std::path::Path;

use crate::application::error::CodecError;
use crate::domain::{Document, Format};
use crate::error::BlankResult;

/// Port for turning bytes into documents and back.
///
/// Implemented by:
/// - `blank_adapters::codec::SerdeCodec` (JSON and YAML)
///
/// Decoding must either produce a complete document or fail; a partially
/// decoded tree is never returned.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentCodec: Send + Sync {
    fn decode(&self, format: Format, bytes: &[u8]) -> Result<Document, CodecError>;

    /// Encode with stable, human-readable layout. Output ends with a newline.
    fn encode(&self, format: Format, document: &Document) -> Result<Vec<u8>, CodecError>;
}

/// Port for reading files.
///
/// Implemented by:
/// - `blank_adapters::filesystem::LocalFilesystem` (production)
/// - `blank_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait FileReader: Send + Sync {
    /// Read the whole file in one go.
    fn read(&self, path: &Path) -> BlankResult<Vec<u8>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
