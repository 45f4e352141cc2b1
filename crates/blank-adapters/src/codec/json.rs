use blank_core::{
    application::CodecError,
    domain::{Document, Format, Scalar},
};

pub(super) fn decode(bytes: &[u8]) -> Result<Document, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::new(Format::Json, e.to_string()))
}

/// Two-space indentation, keys in document order, trailing newline.
///
/// Non-string keys and non-finite floats have no JSON form and are errors.
pub(super) fn encode(document: &Document) -> Result<Vec<u8>, CodecError> {
    check(document)?;
    let mut out =
        serde_json::to_vec_pretty(document).map_err(|e| CodecError::new(Format::Json, e.to_string()))?;
    out.push(b'\n');
    Ok(out)
}

fn check(document: &Document) -> Result<(), CodecError> {
    match document {
        Document::Mapping(map) => map.iter().try_for_each(|(key, value)| {
            if !key.is_string() {
                return Err(CodecError::new(
                    Format::Json,
                    format!("mapping key {key} is not a string"),
                ));
            }
            check(value)
        }),
        Document::Sequence(items) => items.iter().try_for_each(check),
        Document::Scalar(Scalar::Float(n)) if !n.is_finite() => Err(CodecError::new(
            Format::Json,
            format!("{n} is not a JSON number"),
        )),
        Document::Scalar(_) => Ok(()),
    }
}
