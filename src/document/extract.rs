//! Read-side path traversal.
//!
//! Walks a parsed path through an in-memory document and returns the node
//! at the terminal segment. Used by the workflow engine to capture
//! response fields into the environment store. The input document is
//! never modified.

use super::error::DocumentError;
use super::path::PathSegment;
use serde_json::Value;

/// Resolves a path against a document and returns the terminal node.
///
/// Each segment must resolve against the node reached so far: field
/// segments require a mapping containing the key, index segments require
/// a mapping whose entry is a sequence long enough for the position. The
/// terminal node may be of any shape; capturing a nested mapping or
/// sequence is legal.
///
/// # Arguments
///
/// * `doc` - The document to read from
/// * `path` - A non-empty parsed path
///
/// # Returns
///
/// A reference to the node at the end of the path, or
/// `DocumentError::PathNotFound` / `DocumentError::IndexOutOfRange`
/// when traversal fails.
///
/// # Examples
///
/// ```
/// use apirun::document::{extract, parse_path};
/// use serde_json::json;
///
/// let doc = json!({"items": [10, 20, 30]});
/// let path = parse_path("items[2]").unwrap();
/// assert_eq!(extract(&doc, &path).unwrap(), &json!(30));
/// ```
pub fn extract<'a>(doc: &'a Value, path: &[PathSegment]) -> Result<&'a Value, DocumentError> {
    let mut current = doc;

    for segment in path {
        current = descend(current, segment)?;
    }

    Ok(current)
}

/// Resolves one segment against a node.
pub(super) fn descend<'a>(
    node: &'a Value,
    segment: &PathSegment,
) -> Result<&'a Value, DocumentError> {
    let mapping = node.as_object().ok_or_else(|| {
        DocumentError::PathNotFound(format!(
            "segment '{}' requires a mapping, found {}",
            segment.field(),
            shape_name(node)
        ))
    })?;

    let entry = mapping.get(segment.field()).ok_or_else(|| {
        DocumentError::PathNotFound(format!("key '{}' is absent", segment.field()))
    })?;

    match segment {
        PathSegment::Field(_) => Ok(entry),
        PathSegment::Index { field, position } => {
            let sequence = entry.as_array().ok_or_else(|| {
                DocumentError::PathNotFound(format!(
                    "key '{}' holds {}, not a sequence",
                    field,
                    shape_name(entry)
                ))
            })?;

            sequence
                .get(*position)
                .ok_or_else(|| DocumentError::IndexOutOfRange {
                    field: field.clone(),
                    index: *position,
                    len: sequence.len(),
                })
        }
    }
}

/// Human-readable name of a node's shape, for error messages.
pub(super) fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
