use std::path::{Path, PathBuf};

use crate::domain::{
    document::Document, error::DomainError, format::Format, patch::PatchSource,
};

/// The config file being patched: its location, the format it was decoded
/// with, and its document.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    path: PathBuf,
    format: Format,
    document: Document,
}

impl Target {
    pub fn new(path: impl Into<PathBuf>, format: Format, document: Document) -> Self {
        Self {
            path: path.into(),
            format,
            document,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Apply sources left to right; later sources see earlier results.
    pub fn apply<I>(&mut self, sources: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = PatchSource>,
    {
        for source in sources {
            source.apply(&mut self.document)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::StrategyFlag;

    fn doc(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    fn source(ordinal: usize, path: &str, json: &str, flag: StrategyFlag) -> PatchSource {
        PatchSource::new(ordinal, path, doc(json), [flag]).unwrap()
    }

    #[test]
    fn end_to_end_merge_then_append() {
        let mut target = Target::new("c.json", Format::Json, doc(r#"{"a": 1, "b": [1, 2]}"#));

        target
            .apply([source(1, "/a", "2", StrategyFlag::Merge)])
            .unwrap();
        assert_eq!(target.document(), &doc(r#"{"a": 2, "b": [1, 2]}"#));

        target
            .apply([source(2, "/b", "[3]", StrategyFlag::Append)])
            .unwrap();
        assert_eq!(target.document(), &doc(r#"{"a": 2, "b": [1, 2, 3]}"#));
    }

    #[test]
    fn order_is_significant() {
        let a = || source(1, "/k", r#""A""#, StrategyFlag::Merge);
        let b = || source(2, "/k", r#""B""#, StrategyFlag::Merge);

        let mut ab = Target::new("t.json", Format::Json, Document::empty_mapping());
        ab.apply([a(), b()]).unwrap();
        let mut ba = Target::new("t.json", Format::Json, Document::empty_mapping());
        ba.apply([b(), a()]).unwrap();

        assert_eq!(ab.document(), &doc(r#"{"k": "B"}"#));
        assert_eq!(ba.document(), &doc(r#"{"k": "A"}"#));
    }
}
