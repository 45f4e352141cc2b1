//! Config file formats and how a format is chosen for a file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A serialisation format the engine can decode and encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Match a type token such as `json`, `.yaml` or `YML`.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.strip_prefix('.').unwrap_or(token);
        match token.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_token)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| DomainError::UnknownFormat {
            tokens: vec![s.to_owned()],
        })
    }
}

/// Map type tokens to formats, keeping their order.
///
/// Unknown tokens are skipped; if none of them is known the whole request
/// fails before any decoder is tried.
pub fn resolve_formats<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Format>, DomainError> {
    let formats: Vec<Format> = tokens
        .iter()
        .filter_map(|t| Format::from_token(t.as_ref()))
        .collect();

    if formats.is_empty() {
        return Err(DomainError::UnknownFormat {
            tokens: tokens.iter().map(|t| t.as_ref().to_owned()).collect(),
        });
    }

    Ok(formats)
}

/// Type tokens for a file: the explicit hint when given, else its extension.
pub fn format_tokens(path: &Path, hint: Option<Format>) -> Vec<String> {
    match hint {
        Some(format) => vec![format.as_str().to_owned()],
        None => vec![
            path.extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default(),
        ],
    }
}
