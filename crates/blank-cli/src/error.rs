//! Error handling for the blank CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::fmt;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use blank_core::error::BlankError;

// Re-export so callers only need `use crate::error::*`.
pub use blank_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

pub const IS_REQUIRED: &str = "is required";
pub const IS_UNKNOWN: &str = "is unknown";

/// What kind of command line option a usage error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Flag,
    Argument,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "flag",
            Self::Argument => "argument",
        })
    }
}

/// `"The path, json"` for named options, `"A"` otherwise.
fn subject(names: &[String]) -> String {
    if names.is_empty() {
        "A".to_owned()
    } else {
        format!("The {}", names.join(", "))
    }
}

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// A flag or argument is missing or not recognised.
    ///
    /// `command` names the subcommand whose usage line is printed after
    /// the message.
    #[error("{} {kind} {reason}", subject(.names))]
    Usage {
        kind: OptionKind,
        names: Vec<String>,
        reason: &'static str,
        command: &'static str,
    },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `blank-core`.
    #[error(transparent)]
    Core(#[from] BlankError),

    // ── Make errors ────────────────────────────────────────────────────────
    /// No `<target>.mk` in any search directory.
    #[error("No makefile for target '{target}'")]
    MakefileNotFound { target: String, search: Vec<PathBuf> },

    /// External command failed to start.
    #[error("External command failed: {command}")]
    ExternalCommandFailed {
        command: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn usage(
        command: &'static str,
        kind: OptionKind,
        reason: &'static str,
        names: &[&str],
    ) -> Self {
        Self::Usage {
            kind,
            names: names.iter().map(|n| (*n).to_owned()).collect(),
            reason,
            command,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Usage { command, .. } => vec![format!(
                "Run 'blank {command} --help' for usage information"
            )],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check your config file with 'blank config path'".into(),
                "Use 'blank init --force' to write a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::MakefileNotFound { target, search } => {
                let mut suggestions = vec![format!("Looked for '{target}.mk' in:")];
                if search.is_empty() {
                    suggestions.push("  (the search path is empty)".into());
                }
                for dir in search {
                    suggestions.push(format!("  • {}", dir.display()));
                }
                suggestions.push("Add a directory with -a DIR or set BLANK_PATH".into());
                suggestions
            }

            Self::ExternalCommandFailed { command, .. } => vec![
                format!("External command failed: {}", command),
                "Ensure the command is installed and in your PATH".into(),
                "Set make.program in the config to use another make".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Usage { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Usage | CoreCategory::Fragment | CoreCategory::Merge => {
                    ErrorCategory::UserError
                }
                CoreCategory::Target => ErrorCategory::Target,
                CoreCategory::Encode | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::MakefileNotFound { .. } => ErrorCategory::Target,
            Self::ExternalCommandFailed { .. } => ErrorCategory::Internal,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Target        |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Target => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// The subcommand whose usage line belongs under this error.
    pub fn usage_command(&self) -> Option<&'static str> {
        match self {
            Self::Usage { command, .. } => Some(*command),
            _ => None,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = std::error::Error::source(self);
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::Target => tracing::warn!("Target error: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = std::error::Error::source(self) {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad flags, arguments, fragments or merge input.
    UserError,
    /// Target file or makefile missing, unreadable or undecodable.
    Target,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}
