//! The JSON/YAML format adapter.
//!
//! Both formats decode straight into [`Document`] through serde, so a
//! malformed file fails as a whole instead of yielding a partial tree.

mod json;
mod yaml;

use blank_core::{
    application::{CodecError, ports::DocumentCodec},
    domain::{Document, Format},
};

/// [`DocumentCodec`] backed by `serde_json` and `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeCodec;

impl SerdeCodec {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentCodec for SerdeCodec {
    fn decode(&self, format: Format, bytes: &[u8]) -> Result<Document, CodecError> {
        match format {
            Format::Json => json::decode(bytes),
            Format::Yaml => yaml::decode(bytes),
        }
    }

    fn encode(&self, format: Format, document: &Document) -> Result<Vec<u8>, CodecError> {
        match format {
            Format::Json => json::encode(document),
            Format::Yaml => yaml::encode(document),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
  "name": "demo",
  "version": 2,
  "ratio": 0.5,
  "private": true,
  "license": null,
  "files": ["src", "dist"],
  "scripts": {"test": "jest", "lint": "eslint ."}
}"#;

    #[test]
    fn json_survives_a_trip_through_yaml() {
        let codec = SerdeCodec::new();
        let original = codec.decode(Format::Json, SAMPLE.as_bytes()).unwrap();

        let yaml = codec.encode(Format::Yaml, &original).unwrap();
        let back = codec.decode(Format::Yaml, &yaml).unwrap();

        assert_eq!(back, original);
    }

    #[test]
    fn json_re_encodes_stably() {
        let codec = SerdeCodec::new();
        let original = codec.decode(Format::Json, SAMPLE.as_bytes()).unwrap();

        let first = codec.encode(Format::Json, &original).unwrap();
        let decoded = codec.decode(Format::Json, &first).unwrap();
        let second = codec.encode(Format::Json, &decoded).unwrap();

        assert_eq!(decoded, original);
        assert_eq!(first, second);
    }

    #[test]
    fn errors_carry_the_format() {
        let err = SerdeCodec::new().decode(Format::Yaml, b"a: [1").unwrap_err();
        assert_eq!(err.format, Format::Yaml);
    }
}
