//! Application layer errors.
//!
//! These are failures of the update run itself: reading, decoding and
//! encoding. Merge rules live in `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, Format};
use crate::error::ErrorCategory;

/// Errors that occur while running an update.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The target file could not be read.
    #[error("cannot read {path}: {reason}")]
    TargetRead { path: PathBuf, reason: String },

    /// The target file is not valid content in any candidate format.
    #[error("cannot decode {path}: {reason}")]
    TargetDecode { path: PathBuf, reason: String },

    /// An `@file` fragment could not be read.
    #[error("patch #{ordinal}: cannot read {path}: {reason}")]
    FragmentRead {
        ordinal: usize,
        path: PathBuf,
        reason: String,
    },

    /// A fragment is not valid document content.
    #[error("patch #{ordinal}: {reason}")]
    FragmentDecode { ordinal: usize, reason: String },

    /// A fragment decoded fine but cannot be applied where it was aimed.
    #[error("patch #{ordinal}: {source}")]
    InvalidFragment {
        ordinal: usize,
        #[source]
        source: DomainError,
    },

    /// The patched document cannot be written in the output format.
    #[error("cannot encode as {format}: {reason}")]
    Encode { format: Format, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TargetRead { path, .. } => vec![
                format!("Target must be an existing config file: {}", path.display()),
                "Check the path and your read permissions".into(),
            ],
            Self::TargetDecode { .. } => vec![
                "Check that the file is valid JSON or YAML".into(),
                "Force the input type with -i/--in json|yaml".into(),
            ],
            Self::FragmentRead { path, .. } => vec![
                format!("Fragment file not readable: {}", path.display()),
                "A json argument starting with '@' is read from that file".into(),
            ],
            Self::FragmentDecode { .. } => vec![
                "Inline json must be valid JSON, quote it for your shell".into(),
                "Strings need their own quotes, e.g. '\"^7\"'".into(),
            ],
            Self::InvalidFragment { source, .. } => source.suggestions(),
            Self::Encode { format, .. } => vec![
                format!("The patched document cannot be written as {format}"),
                "Try another output type with -o/--out".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the file exists and is readable".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TargetRead { .. } | Self::TargetDecode { .. } => ErrorCategory::Target,
            Self::FragmentRead { .. } | Self::FragmentDecode { .. } => ErrorCategory::Fragment,
            Self::InvalidFragment { .. } => ErrorCategory::Merge,
            Self::Encode { .. } => ErrorCategory::Encode,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }

    /// The 1-based operation number, for fragment errors.
    pub fn ordinal(&self) -> Option<usize> {
        match self {
            Self::FragmentRead { ordinal, .. }
            | Self::FragmentDecode { ordinal, .. }
            | Self::InvalidFragment { ordinal, .. } => Some(*ordinal),
            _ => None,
        }
    }
}

/// Failure reported by a [`DocumentCodec`](super::ports::DocumentCodec).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{format}: {message}")]
pub struct CodecError {
    pub format: Format,
    pub message: String,
}

impl CodecError {
    pub fn new(format: Format, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}
