//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use blank_core::{
    application::{ApplicationError, ports::FileReader},
    error::{BlankError, BlankResult},
};

/// Production file reader using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileReader for LocalFilesystem {
    fn read(&self, path: &Path) -> BlankResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

fn map_io_error(path: &Path, e: io::Error) -> BlankError {
    let reason = match e.kind() {
        io::ErrorKind::NotFound => "no such file".to_owned(),
        io::ErrorKind::PermissionDenied => "permission denied".to_owned(),
        _ => e.to_string(),
    };

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}
