use blank_core::{
    application::CodecError,
    domain::{Document, Format, Key, Mapping, Scalar},
};
use serde_yaml::Value;

/// Decode through [`Value`] so parse errors keep their line and column.
///
/// Tags (`!Ref Foo`) are dropped and the tagged value is kept.
pub(super) fn decode(bytes: &[u8]) -> Result<Document, CodecError> {
    let value: Value =
        serde_yaml::from_slice(bytes).map_err(|e| CodecError::new(Format::Yaml, e.to_string()))?;
    to_document(value)
}

pub(super) fn encode(document: &Document) -> Result<Vec<u8>, CodecError> {
    serde_yaml::to_string(document)
        .map(String::into_bytes)
        .map_err(|e| CodecError::new(Format::Yaml, e.to_string()))
}

fn to_document(value: Value) -> Result<Document, CodecError> {
    Ok(match value {
        Value::Null => Document::null(),
        Value::Bool(b) => Document::from(b),
        Value::Number(n) => Document::Scalar(number(&n)),
        Value::String(s) => Document::from(s),
        Value::Sequence(items) => Document::Sequence(
            items
                .into_iter()
                .map(to_document)
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(entries) => {
            let mut map = Mapping::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(to_key(key)?, to_document(value)?);
            }
            Document::Mapping(map)
        }
        Value::Tagged(tagged) => to_document(tagged.value)?,
    })
}

fn to_key(value: Value) -> Result<Key, CodecError> {
    match value {
        Value::Null => Ok(Key::Null),
        Value::Bool(b) => Ok(Key::Bool(b)),
        Value::Number(n) => Ok(match n.as_i64() {
            Some(i) => Key::Int(i),
            None => Key::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Value::String(s) => Ok(Key::String(s)),
        Value::Tagged(tagged) => to_key(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => Err(CodecError::new(
            Format::Yaml,
            "unsupported mapping key: keys must be scalars",
        )),
    }
}

/// Integers that fit `i64` stay integers; anything else widens to a float.
fn number(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::Float(u as f64)
    } else {
        Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blank_core::domain::DocumentKind;

    #[test]
    fn block_style_keeps_key_order() {
        let doc = decode(b"name: demo\ndeps:\n  b: 2\n  a: 1\n").unwrap();
        let out = String::from_utf8(encode(&doc).unwrap()).unwrap();

        assert_eq!(out, "name: demo\ndeps:\n  b: 2\n  a: 1\n");
    }

    #[test]
    fn scalars_keep_their_kind() {
        let doc = decode(b"i: 1\nf: 1.5\nb: true\nn: null\ns: '1'\n").unwrap();

        assert_eq!(doc.get("i").map(Document::kind), Some(DocumentKind::Int));
        assert_eq!(doc.get("f").map(Document::kind), Some(DocumentKind::Float));
        assert_eq!(doc.get("b").map(Document::kind), Some(DocumentKind::Bool));
        assert_eq!(doc.get("n").map(Document::kind), Some(DocumentKind::Null));
        assert_eq!(doc.get("s").map(Document::kind), Some(DocumentKind::String));
    }

    #[test]
    fn non_string_keys_round_trip() {
        let text = "responses:\n  200:\n    description: ok\n  true: done\n";
        let doc = decode(text.as_bytes()).unwrap();

        let responses = doc.get("responses").unwrap();
        assert_eq!(
            responses.get(200_i64).and_then(|d| d.get("description")),
            Some(&Document::from("ok"))
        );
        assert_eq!(responses.get(true), Some(&Document::from("done")));
        assert_eq!(String::from_utf8(encode(&doc).unwrap()).unwrap(), text);
    }

    #[test]
    fn tags_are_dropped() {
        let doc = decode(b"a:\n  b: !Ref Foo\n").unwrap();
        assert_eq!(
            doc.get("a").and_then(|a| a.get("b")),
            Some(&Document::from("Foo"))
        );
    }

    #[test]
    fn collection_keys_are_rejected() {
        let err = decode(b"? [1, 2]\n: x\n").unwrap_err();
        assert!(err.message.contains("mapping key"));
    }

    #[test]
    fn syntax_errors_report_the_position() {
        let err = decode(b"a: [1\n").unwrap_err();
        assert!(err.message.contains("line"), "{}", err.message);
    }
}
