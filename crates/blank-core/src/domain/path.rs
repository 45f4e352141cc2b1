//! Slash-delimited pointers into a document.
//!
//! A patch never walks the target. Instead its value is wrapped in a chain
//! of single-key mappings (`/a/b` + `V` becomes `{a: {b: V}}`) and the merge
//! engine does the descent.

use std::fmt;

use crate::domain::document::{Document, Key, Mapping};

/// A pointer such as `/dependencies/eslint`. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    pub fn new(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Wrap `value` so that it sits at this path.
    pub fn wrap(&self, value: Document) -> Document {
        self.segments.iter().rev().fold(value, |inner, key| {
            let mut map = Mapping::with_capacity(1);
            map.insert(Key::from(key), inner);
            Document::Mapping(map)
        })
    }
}

impl From<&str> for DocumentPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Turn `path` + `value` into a nested single-key mapping chain.
///
/// Leading and trailing slashes are ignored. An empty path returns `value`
/// unchanged; callers applying it at the root must check it is a mapping.
pub fn resolve(path: &str, value: Document) -> Document {
    DocumentPath::new(path).wrap(value)
}
