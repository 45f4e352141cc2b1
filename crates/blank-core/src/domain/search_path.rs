//! The makefile search path (`BLANK_PATH`).
//!
//! An ordered list of directories, passed explicitly to whoever needs it.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// Name of the environment variable holding the search path.
pub const BLANK_PATH: &str = "BLANK_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a `PATH`-style value using the platform's list separator.
    /// Empty entries are dropped.
    pub fn from_env_value(value: impl AsRef<OsStr>) -> Self {
        Self {
            dirs: split(value.as_ref()),
        }
    }

    /// Append a directory (`-a`).
    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.push(dir.into());
    }

    /// Replace every directory with the ones in `value` (`-P`).
    pub fn replace(&mut self, value: impl AsRef<OsStr>) {
        self.dirs = split(value.as_ref());
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Join back into a single value suitable for exporting as `BLANK_PATH`.
    pub fn join_env_value(&self) -> Result<OsString, DomainError> {
        env::join_paths(&self.dirs).map_err(|e| DomainError::InvalidSearchPath {
            reason: e.to_string(),
        })
    }
}

fn split(value: &OsStr) -> Vec<PathBuf> {
    env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}
