//! Unified error handling for blank-core.
//!
//! `BlankError` wraps domain and application errors so callers deal with a
//! single type, with a category for display and suggestions for the user.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for blank-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BlankError {
    /// Errors from the domain layer (bad tokens, invalid merge input).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (reading, decoding, encoding).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl BlankError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in blank".into(),
                "Please report this issue at: https://github.com/makeblank/blank/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Usage => ErrorCategory::Usage,
                crate::domain::ErrorCategory::Merge => ErrorCategory::Merge,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad flag, argument or format token.
    Usage,
    /// Target missing, unreadable or undecodable.
    Target,
    /// A patch fragment is unreadable or undecodable.
    Fragment,
    /// Structurally invalid merge input.
    Merge,
    /// Output cannot be serialised.
    Encode,
    Internal,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::Target => "target",
            Self::Fragment => "fragment",
            Self::Merge => "merge",
            Self::Encode => "encode",
            Self::Internal => "internal",
        }
    }
}

/// Convenient result type alias.
pub type BlankResult<T> = Result<T, BlankError>;
