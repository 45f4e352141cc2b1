//! The merge engine.
//!
//! Merging walks the source mapping key by key:
//!
//! | target      | source      | set          | merge      | append / dedup    |
//! |-------------|-------------|--------------|------------|-------------------|
//! | (missing)   | any         | insert       | insert     | insert            |
//! | mapping     | mapping     | recurse      | recurse    | recurse           |
//! | sequence    | sequence    | keep target  | replace    | concatenate       |
//! | anything    | anything    | keep target  | replace    | replace           |
//!
//! Type mismatches are never errors; the only invalid input is a source
//! that is not a mapping at the root.

use crate::domain::{
    document::{Document, Mapping},
    error::DomainError,
    strategy::MergeStrategy,
};

/// Merge `source` into `target` and return the result.
pub fn merge(
    mut target: Document,
    source: Document,
    strategy: MergeStrategy,
) -> Result<Document, DomainError> {
    merge_into(&mut target, source, strategy)?;
    Ok(target)
}

/// Merge `source` into `target` in place.
pub fn merge_into(
    target: &mut Document,
    source: Document,
    strategy: MergeStrategy,
) -> Result<(), DomainError> {
    let source = match source {
        Document::Mapping(map) => map,
        other => {
            return Err(DomainError::NonMappingRoot {
                kind: other.kind().as_str(),
            });
        }
    };

    match target {
        Document::Mapping(map) => merge_mappings(map, source, strategy),
        slot => {
            if strategy.overwrites() {
                *slot = Document::Mapping(source);
            }
        }
    }

    Ok(())
}

fn merge_mappings(target: &mut Mapping, source: Mapping, strategy: MergeStrategy) {
    for (key, incoming) in source {
        match target.get_mut(&key) {
            Some(existing) => merge_values(existing, incoming, strategy),
            None => {
                target.insert(key, incoming);
            }
        }
    }
}

fn merge_values(existing: &mut Document, incoming: Document, strategy: MergeStrategy) {
    match (existing, incoming) {
        (Document::Mapping(target), Document::Mapping(source)) => {
            merge_mappings(target, source, strategy);
        }
        (Document::Sequence(target), Document::Sequence(source)) if strategy.appends() => {
            append(target, source, strategy.dedups());
        }
        (slot, incoming) => {
            if strategy.overwrites() {
                *slot = incoming;
            }
        }
    }
}

/// Concatenate `source` onto `target`.
///
/// With `dedup`, an element is only appended when nothing structurally equal
/// is already in the result. Duplicates that were already in the target are
/// left alone.
fn append(target: &mut Vec<Document>, source: Vec<Document>, dedup: bool) {
    if !dedup {
        target.extend(source);
        return;
    }

    for item in source {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Key;

    fn doc(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    fn merged(target: &str, source: &str, strategy: MergeStrategy) -> Document {
        merge(doc(target), doc(source), strategy).unwrap()
    }

    // ========================================================================
    // set
    // ========================================================================

    #[test]
    fn set_never_overwrites() {
        let result = merged(r#"{"k": 1}"#, r#"{"k": 2}"#, MergeStrategy::Set);
        assert_eq!(result, doc(r#"{"k": 1}"#));
    }

    #[test]
    fn set_fills_missing_keys() {
        let result = merged(r#"{"a": 1}"#, r#"{"b": 2}"#, MergeStrategy::Set);
        assert_eq!(result, doc(r#"{"a": 1, "b": 2}"#));
    }

    #[test]
    fn set_recurses_into_mappings() {
        let result = merged(
            r#"{"deps": {"a": "^1"}}"#,
            r#"{"deps": {"a": "^2", "b": "^3"}}"#,
            MergeStrategy::Set,
        );
        assert_eq!(result, doc(r#"{"deps": {"a": "^1", "b": "^3"}}"#));
    }

    #[test]
    fn set_keeps_explicit_null() {
        let result = merged(r#"{"k": null}"#, r#"{"k": 1}"#, MergeStrategy::Set);
        assert_eq!(result, doc(r#"{"k": null}"#));
    }

    #[test]
    fn set_keeps_sequences() {
        let result = merged(r#"{"k": [1]}"#, r#"{"k": [2]}"#, MergeStrategy::Set);
        assert_eq!(result, doc(r#"{"k": [1]}"#));
    }

    // ========================================================================
    // merge
    // ========================================================================

    #[test]
    fn merge_overwrites_scalars() {
        let result = merged(r#"{"k": 1, "x": 0}"#, r#"{"k": 2}"#, MergeStrategy::Merge);
        assert_eq!(result, doc(r#"{"k": 2, "x": 0}"#));
    }

    #[test]
    fn merge_recurses_instead_of_replacing_mappings() {
        let result = merged(
            r#"{"server": {"host": "localhost", "port": 8080}}"#,
            r#"{"server": {"port": 9000}}"#,
            MergeStrategy::Merge,
        );
        assert_eq!(
            result,
            doc(r#"{"server": {"host": "localhost", "port": 9000}}"#)
        );
    }

    #[test]
    fn merge_replaces_sequences() {
        let result = merged(r#"{"k": [1, 2]}"#, r#"{"k": [3]}"#, MergeStrategy::Merge);
        assert_eq!(result, doc(r#"{"k": [3]}"#));
    }

    #[test]
    fn merge_type_mismatch_replaces_wholesale() {
        let result = merged(
            r#"{"k": {"nested": true}}"#,
            r#"{"k": "flat"}"#,
            MergeStrategy::Merge,
        );
        assert_eq!(result, doc(r#"{"k": "flat"}"#));

        let result = merged(r#"{"k": 42}"#, r#"{"k": {"n": 1}}"#, MergeStrategy::Merge);
        assert_eq!(result, doc(r#"{"k": {"n": 1}}"#));
    }

    #[test]
    fn merge_null_source_overwrites() {
        let result = merged(r#"{"k": 1}"#, r#"{"k": null}"#, MergeStrategy::Merge);
        assert_eq!(result, doc(r#"{"k": null}"#));
    }

    // ========================================================================
    // append / dedup
    // ========================================================================

    #[test]
    fn append_concatenates_sequences() {
        let result = merged(r#"{"k": [1, 2]}"#, r#"{"k": [3, 4]}"#, MergeStrategy::Append);
        assert_eq!(result, doc(r#"{"k": [1, 2, 3, 4]}"#));
    }

    #[test]
    fn append_still_overwrites_scalars() {
        let result = merged(
            r#"{"k": [1], "v": 1}"#,
            r#"{"k": [1], "v": 2}"#,
            MergeStrategy::Append,
        );
        assert_eq!(result, doc(r#"{"k": [1, 1], "v": 2}"#));
    }

    #[test]
    fn append_replaces_sequence_with_scalar() {
        let result = merged(r#"{"k": [1]}"#, r#"{"k": "x"}"#, MergeStrategy::Append);
        assert_eq!(result, doc(r#"{"k": "x"}"#));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let result = merged(
            r#"{"extends": ["a", "b"]}"#,
            r#"{"extends": ["b", "c", "a", "c"]}"#,
            MergeStrategy::Dedup,
        );
        assert_eq!(result, doc(r#"{"extends": ["a", "b", "c"]}"#));
    }

    #[test]
    fn dedup_compares_structurally() {
        let result = merged(
            r#"{"k": [{"x": 1, "y": 2}]}"#,
            r#"{"k": [{"y": 2, "x": 1}, {"x": 3}]}"#,
            MergeStrategy::Dedup,
        );
        assert_eq!(result, doc(r#"{"k": [{"x": 1, "y": 2}, {"x": 3}]}"#));
    }

    #[test]
    fn dedup_leaves_existing_duplicates_alone() {
        let result = merged(r#"{"k": [1, 1]}"#, r#"{"k": [1, 2]}"#, MergeStrategy::Dedup);
        assert_eq!(result, doc(r#"{"k": [1, 1, 2]}"#));
    }

    // ========================================================================
    // root handling
    // ========================================================================

    #[test]
    fn non_mapping_source_at_root_is_rejected() {
        let err = merge(doc(r#"{"a": 1}"#), doc("[1]"), MergeStrategy::Merge).unwrap_err();
        assert_eq!(err, DomainError::NonMappingRoot { kind: "sequence" });
    }

    #[test]
    fn non_mapping_target_is_replaced_under_merge() {
        let result = merged("[1]", r#"{"a": 1}"#, MergeStrategy::Merge);
        assert_eq!(result, doc(r#"{"a": 1}"#));
        let result = merged("[1]", r#"{"a": 1}"#, MergeStrategy::Set);
        assert_eq!(result, doc("[1]"));
    }

    #[test]
    fn integer_keys_merge_with_integer_keys_only() {
        let target = Document::mapping([(
            Key::Int(200),
            Document::mapping([("description", Document::from("ok"))]),
        )]);
        let source = Document::mapping([
            (Key::Int(200), Document::mapping([("x", Document::from(1))])),
            (Key::from("200"), Document::from(true)),
        ]);

        let result = merge(target, source, MergeStrategy::Merge).unwrap();
        let expected = Document::mapping([
            (
                Key::Int(200),
                Document::mapping([
                    ("description", Document::from("ok")),
                    ("x", Document::from(1)),
                ]),
            ),
            (Key::from("200"), Document::from(true)),
        ]);
        assert_eq!(result, expected);
    }

    #[test]
    fn new_keys_are_appended_in_source_order() {
        let result = merged(r#"{"a": 1}"#, r#"{"c": 3, "b": 2}"#, MergeStrategy::Merge);
        let keys: Vec<&str> = result
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Key::as_str)
            .collect();
        assert_eq!(keys, ["a", "c", "b"]);
    }
}
