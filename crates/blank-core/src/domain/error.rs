// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so a failed patch can be reported more than once)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Usage Errors (bad tokens handed to the engine)
    // ========================================================================
    #[error("unknown config file type: {tokens:?}")]
    UnknownFormat { tokens: Vec<String> },

    #[error("unknown merge strategy: {0}")]
    UnknownStrategy(String),

    #[error("invalid search path entry: {reason}")]
    InvalidSearchPath { reason: String },

    // ========================================================================
    // Merge Errors (structurally invalid merge inputs)
    // ========================================================================
    #[error("json must be an object if path is omitted (got {kind})")]
    NonMappingRoot { kind: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownFormat { tokens } => vec![
                format!("Unrecognised type(s): {}", tokens.join(", ")),
                "Supported config file types: json, yaml".into(),
                "Force a type with -i/--in json|yaml".into(),
            ],
            Self::UnknownStrategy(flag) => vec![
                format!("'{}' is not a merge operation", flag),
                "Operations: -s (set), -m (merge), -a (append), -u (unique)".into(),
            ],
            Self::InvalidSearchPath { .. } => vec![
                "Directories in BLANK_PATH must not contain the path list separator".into(),
            ],
            Self::NonMappingRoot { .. } => vec![
                "Give a path to the member being replaced, e.g. /name".into(),
                "Or wrap the value in an object: '{\"name\": ...}'".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownFormat { .. }
            | Self::UnknownStrategy(_)
            | Self::InvalidSearchPath { .. } => ErrorCategory::Usage,
            Self::NonMappingRoot { .. } => ErrorCategory::Merge,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Merge,
}
