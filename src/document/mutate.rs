//! Write-side path traversal.
//!
//! Walks all but the last segment of a path exactly as the extractor
//! does, then overwrites the value at the terminal segment in place. Used
//! by the workflow engine to apply body overrides before a request is
//! built. The terminal segment is always the last segment of the path;
//! intermediate segments must resolve to mapping or sequence nodes.
//!
//! Field terminals insert-or-replace the key. Index terminals replace an
//! existing element only; growing a sequence through an out-of-range
//! write is not supported and fails instead.

use super::error::DocumentError;
use super::extract::shape_name;
use super::path::PathSegment;
use serde_json::Value;

/// Writes `new_value` at the location addressed by `path`, in place.
///
/// # Arguments
///
/// * `doc` - The document to modify; the caller retains ownership
/// * `path` - A non-empty parsed path
/// * `new_value` - The value to store at the terminal segment
///
/// # Returns
///
/// `Ok(())` on success. Fails with `DocumentError::PathNotFound` when an
/// intermediate key is absent or a node's shape does not match its
/// segment, and `DocumentError::IndexOutOfRange` when an index terminal
/// addresses a position outside the existing sequence.
///
/// # Examples
///
/// ```
/// use apirun::document::{mutate, parse_path};
/// use serde_json::json;
///
/// let mut doc = json!({"headers": {"x": "old"}});
/// let path = parse_path("headers.x").unwrap();
/// mutate(&mut doc, &path, json!("new")).unwrap();
/// assert_eq!(doc, json!({"headers": {"x": "new"}}));
/// ```
pub fn mutate(
    doc: &mut Value,
    path: &[PathSegment],
    new_value: Value,
) -> Result<(), DocumentError> {
    let (terminal, leading) = path
        .split_last()
        .ok_or_else(|| DocumentError::MalformedPath("empty path".to_string()))?;

    let mut parent = doc;
    for segment in leading {
        parent = descend_mut(parent, segment)?;
    }

    write_terminal(parent, terminal, new_value)
}

/// Resolves one intermediate segment against a node, mutably.
fn descend_mut<'a>(
    node: &'a mut Value,
    segment: &PathSegment,
) -> Result<&'a mut Value, DocumentError> {
    let shape = shape_name(node);
    let mapping = node.as_object_mut().ok_or_else(|| {
        DocumentError::PathNotFound(format!(
            "segment '{}' requires a mapping, found {}",
            segment.field(),
            shape
        ))
    })?;

    let entry = mapping.get_mut(segment.field()).ok_or_else(|| {
        DocumentError::PathNotFound(format!("key '{}' is absent", segment.field()))
    })?;

    match segment {
        PathSegment::Field(_) => Ok(entry),
        PathSegment::Index { field, position } => {
            let shape = shape_name(entry);
            let sequence = entry.as_array_mut().ok_or_else(|| {
                DocumentError::PathNotFound(format!(
                    "key '{}' holds {}, not a sequence",
                    field, shape
                ))
            })?;

            let len = sequence.len();
            sequence
                .get_mut(*position)
                .ok_or(DocumentError::IndexOutOfRange {
                    field: field.clone(),
                    index: *position,
                    len,
                })
        }
    }
}

/// Overwrites the value addressed by the terminal segment of a path.
fn write_terminal(
    parent: &mut Value,
    terminal: &PathSegment,
    new_value: Value,
) -> Result<(), DocumentError> {
    let shape = shape_name(parent);
    let mapping = parent.as_object_mut().ok_or_else(|| {
        DocumentError::PathNotFound(format!(
            "segment '{}' requires a mapping, found {}",
            terminal.field(),
            shape
        ))
    })?;

    match terminal {
        PathSegment::Field(name) => {
            mapping.insert(name.clone(), new_value);
            Ok(())
        }
        PathSegment::Index { field, position } => {
            let entry = mapping
                .get_mut(field)
                .ok_or_else(|| DocumentError::PathNotFound(format!("key '{}' is absent", field)))?;

            let shape = shape_name(entry);
            let sequence = entry.as_array_mut().ok_or_else(|| {
                DocumentError::PathNotFound(format!(
                    "key '{}' holds {}, not a sequence",
                    field, shape
                ))
            })?;

            let len = sequence.len();
            let slot = sequence
                .get_mut(*position)
                .ok_or(DocumentError::IndexOutOfRange {
                    field: field.clone(),
                    index: *position,
                    len,
                })?;

            *slot = new_value;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{extract, parse_path};
    use serde_json::json;

    #[test]
    fn test_mutate_replaces_existing_field() {
        let mut doc = json!({"headers": {"x": "old"}});
        let path = parse_path("headers.x").unwrap();
        mutate(&mut doc, &path, json!("new")).unwrap();
        assert_eq!(doc, json!({"headers": {"x": "new"}}));
    }

    #[test]
    fn test_mutate_inserts_missing_terminal_field() {
        let mut doc = json!({"headers": {}});
        let path = parse_path("headers.x").unwrap();
        mutate(&mut doc, &path, json!("value")).unwrap();
        assert_eq!(doc, json!({"headers": {"x": "value"}}));
    }

    #[test]
    fn test_mutate_top_level_field() {
        let mut doc = json!({"name": "before"});
        let path = parse_path("name").unwrap();
        mutate(&mut doc, &path, json!("after")).unwrap();
        assert_eq!(doc, json!({"name": "after"}));
    }

    #[test]
    fn test_mutate_array_element() {
        let mut doc = json!({"items": [10, 20, 30]});
        let path = parse_path("items[1]").unwrap();
        mutate(&mut doc, &path, json!(99)).unwrap();
        assert_eq!(doc, json!({"items": [10, 99, 30]}));
    }

    #[test]
    fn test_mutate_through_array() {
        let mut doc = json!({"data": {"users": [{"id": 1}, {"id": 2}]}});
        let path = parse_path("data.users[1].id").unwrap();
        mutate(&mut doc, &path, json!(42)).unwrap();
        assert_eq!(doc, json!({"data": {"users": [{"id": 1}, {"id": 42}]}}));
    }

    #[test]
    fn test_mutate_does_not_grow_sequence() {
        let mut doc = json!({"items": [10]});
        let path = parse_path("items[5]").unwrap();
        let err = mutate(&mut doc, &path, json!(0)).unwrap_err();
        assert!(matches!(err, DocumentError::IndexOutOfRange { .. }));
        assert_eq!(doc, json!({"items": [10]}));
    }

    #[test]
    fn test_mutate_missing_intermediate_key() {
        let mut doc = json!({"a": {}});
        let path = parse_path("a.b.c").unwrap();
        let err = mutate(&mut doc, &path, json!(1)).unwrap_err();
        assert!(matches!(err, DocumentError::PathNotFound(_)));
    }

    #[test]
    fn test_mutate_through_scalar() {
        let mut doc = json!({"a": "scalar"});
        let path = parse_path("a.b").unwrap();
        let err = mutate(&mut doc, &path, json!(1)).unwrap_err();
        assert!(matches!(err, DocumentError::PathNotFound(_)));
    }

    #[test]
    fn test_mutate_index_terminal_into_non_sequence() {
        let mut doc = json!({"items": {"nested": true}});
        let path = parse_path("items[0]").unwrap();
        let err = mutate(&mut doc, &path, json!(1)).unwrap_err();
        assert!(matches!(err, DocumentError::PathNotFound(_)));
    }

    #[test]
    fn test_mutate_with_structured_value() {
        let mut doc = json!({"body": {"user": null}});
        let path = parse_path("body.user").unwrap();
        mutate(&mut doc, &path, json!({"id": 7, "tags": ["x"]})).unwrap();
        assert_eq!(doc, json!({"body": {"user": {"id": 7, "tags": ["x"]}}}));
    }

    #[test]
    fn test_self_write_is_idempotent() {
        let original = json!({
            "user": {"id": 9, "emails": ["a@x", "b@x"]},
            "count": 2
        });

        for raw in ["user.id", "user.emails[1]", "count", "user"] {
            let mut doc = original.clone();
            let path = parse_path(raw).unwrap();
            let value = extract(&doc, &path).unwrap().clone();
            mutate(&mut doc, &path, value).unwrap();
            assert_eq!(doc, original, "self-write through '{}' changed the doc", raw);
        }
    }
}
