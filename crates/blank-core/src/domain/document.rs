//! The document model: an in-memory tree of parsed configuration content.
//!
//! # Design
//!
//! `Document` is a closed sum type over {Mapping, Sequence, Scalar}. It
//! derives `Serialize`/`Deserialize` (untagged), so every serde format can
//! decode straight into it and the merge engine never inspects an untyped
//! value. Mappings keep insertion order for deterministic re-serialisation,
//! while equality between mappings ignores order.
//!
//! Mapping keys are scalars, not just strings: YAML allows `200:` or
//! `true:` as keys. Formats that only have string keys reject the others
//! when encoding.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Insertion-ordered mapping with scalar keys.
pub type Mapping = IndexMap<Key, Document>;

/// A mapping key.
///
/// Keys of different kinds never compare equal, so `200` and `"200"` are
/// two keys. Float keys compare by bit pattern.
#[derive(Debug, Clone)]
pub enum Key {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Key {
    /// The key text, when it is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(f) => f.to_bits().hash(state),
            Self::String(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Key, E> {
        Ok(Key::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Key, E> {
        Ok(Key::Null)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Key, E> {
        Ok(Key::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Key, E> {
        Ok(Key::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Key, E> {
        Ok(i64::try_from(n).map_or(Key::Float(n as f64), Key::Int))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Key, E> {
        Ok(Key::Float(n))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Key, E> {
        Ok(Key::String(s.to_owned()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Key, E> {
        Ok(Key::String(s))
    }
}

/// A parsed configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    Mapping(Mapping),
    Sequence(Vec<Document>),
    Scalar(Scalar),
}

/// Leaf values.
///
/// Integers and floats are kept apart so that `1` survives a round trip as
/// `1`; a float that happens to be integral may still come back widened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Shape of a document node, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Mapping,
    Sequence,
    Null,
    Bool,
    Int,
    Float,
    String,
}

impl DocumentKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Document {
    /// An empty mapping, the identity for merging.
    pub fn empty_mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Build a mapping from key/value pairs, keeping their order.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, Document)>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Mapping(_) => DocumentKind::Mapping,
            Self::Sequence(_) => DocumentKind::Sequence,
            Self::Scalar(Scalar::Null) => DocumentKind::Null,
            Self::Scalar(Scalar::Bool(_)) => DocumentKind::Bool,
            Self::Scalar(Scalar::Int(_)) => DocumentKind::Int,
            Self::Scalar(Scalar::Float(_)) => DocumentKind::Float,
            Self::Scalar(Scalar::String(_)) => DocumentKind::String,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a direct child of a mapping.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Document> {
        let key = key.into();
        self.as_mapping().and_then(|m| m.get(&key))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::null()
    }
}

impl From<Scalar> for Document {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<Mapping> for Document {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Self::Sequence(items)
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Document {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Int(n))
    }
}

impl From<i32> for Document {
    fn from(n: i32) -> Self {
        Self::Scalar(Scalar::Int(i64::from(n)))
    }
}

impl From<f64> for Document {
    fn from(n: f64) -> Self {
        Self::Scalar(Scalar::Float(n))
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_owned()))
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_every_shape() {
        let doc = parse(r#"{"s": "x", "i": 1, "f": 1.5, "b": true, "n": null, "l": [1, "a"]}"#);

        assert_eq!(doc.kind(), DocumentKind::Mapping);
        assert_eq!(doc.get("s"), Some(&Document::from("x")));
        assert_eq!(doc.get("i"), Some(&Document::from(1)));
        assert_eq!(doc.get("f"), Some(&Document::from(1.5)));
        assert_eq!(doc.get("b"), Some(&Document::from(true)));
        assert!(doc.get("n").is_some_and(Document::is_null));
        assert_eq!(
            doc.get("l"),
            Some(&Document::from(vec![Document::from(1), Document::from("a")]))
        );
    }

    #[test]
    fn large_unsigned_widens_to_float() {
        let doc = parse("18446744073709551615");
        assert_eq!(doc.kind(), DocumentKind::Float);
    }

    #[test]
    fn mapping_equality_ignores_order() {
        let a = Document::mapping([("a", Document::from(1)), ("b", Document::from(2))]);
        let b = Document::mapping([("b", Document::from(2)), ("a", Document::from(1))]);
        assert_eq!(a, b);
    }

    #[test]
    fn mapping_keeps_insertion_order_when_encoded() {
        let doc = Document::mapping([("z", Document::from(1)), ("a", Document::from(2))]);
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn keys_of_different_kinds_are_distinct() {
        let doc = Document::mapping([
            (Key::Int(200), Document::from("int")),
            (Key::from("200"), Document::from("string")),
        ]);
        assert_eq!(doc.as_mapping().map(Mapping::len), Some(2));
        assert_eq!(doc.get(200_i64), Some(&Document::from("int")));
        assert_eq!(doc.get("200"), Some(&Document::from("string")));
    }

    #[test]
    fn json_keys_are_strings() {
        let doc = parse(r#"{"1": true}"#);
        let key = doc.as_mapping().and_then(|m| m.keys().next()).unwrap();
        assert_eq!(key, &Key::from("1"));
        assert!(key.is_string());
    }

    #[test]
    fn null_encodes_as_null() {
        assert_eq!(serde_json::to_string(&Document::null()).unwrap(), "null");
    }

    #[test]
    fn kind_names_are_human_readable() {
        assert_eq!(Document::empty_mapping().kind().to_string(), "mapping");
        assert_eq!(Document::from(vec![]).kind().to_string(), "sequence");
        assert_eq!(Document::from("x").kind().to_string(), "string");
    }
}
