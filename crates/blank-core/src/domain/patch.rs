//! Patch sources: one (path, fragment, strategy) unit of an update run.

use std::fmt;
use std::path::PathBuf;

use crate::domain::{
    document::Document,
    error::DomainError,
    merge::merge_into,
    path::DocumentPath,
    strategy::{MergeStrategy, StrategyFlag},
};

/// Where a fragment's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentRef {
    /// JSON text given directly on the command line.
    Inline(String),
    /// `@file`: read and decode the named file.
    File(PathBuf),
}

impl FragmentRef {
    pub fn parse(literal: &str) -> Self {
        match literal.strip_prefix('@') {
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::Inline(literal.to_owned()),
        }
    }
}

impl fmt::Display for FragmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(text) => f.write_str(text),
            Self::File(path) => write!(f, "@{}", path.display()),
        }
    }
}

/// An operation as typed by the user, before its fragment is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSpec {
    pub flags: Vec<StrategyFlag>,
    pub path: String,
    pub fragment: FragmentRef,
}

impl PatchSpec {
    pub fn new<I>(flags: I, path: impl Into<String>, literal: &str) -> Self
    where
        I: IntoIterator<Item = StrategyFlag>,
    {
        Self {
            flags: flags.into_iter().collect(),
            path: path.into(),
            fragment: FragmentRef::parse(literal),
        }
    }
}

/// A decoded fragment, already wrapped at its path, with the strategy it
/// must be merged with.
///
/// Immutable once built and consumed by [`PatchSource::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct PatchSource {
    ordinal: usize,
    path: DocumentPath,
    fragment: Document,
    strategy: MergeStrategy,
}

impl PatchSource {
    /// Build the source for the `ordinal`-th operation (1-based).
    ///
    /// Fails when `path` is the root and `value` is not a mapping.
    pub fn new<I>(
        ordinal: usize,
        path: &str,
        value: Document,
        flags: I,
    ) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = StrategyFlag>,
    {
        let path = DocumentPath::new(path);

        if path.is_root() && !value.is_mapping() {
            return Err(DomainError::NonMappingRoot {
                kind: value.kind().as_str(),
            });
        }

        Ok(Self {
            ordinal,
            fragment: path.wrap(value),
            path,
            strategy: MergeStrategy::from_flags(flags),
        })
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn label(&self) -> String {
        format!("patch #{}", self.ordinal)
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    /// The fragment wrapped at its path.
    pub fn fragment(&self) -> &Document {
        &self.fragment
    }

    pub fn strategy(&self) -> MergeStrategy {
        self.strategy
    }

    /// Merge this source into `target`.
    pub fn apply(self, target: &mut Document) -> Result<(), DomainError> {
        merge_into(target, self.fragment, self.strategy)
    }
}
