//! Path expression parsing.
//!
//! A path addresses a location inside a nested document using dotted
//! field names with optional bracketed array indices:
//!
//! ```text
//! user.addresses[0].city
//! ```
//!
//! `.` separates segments; `[<digits>]` immediately after a field name
//! indexes into the sequence stored under that field. This syntax is
//! shared by response captures and body overrides, so a path written down
//! while reading a response can be reused verbatim to write into a later
//! request.

use super::error::DocumentError;

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Descend into a mapping by key.
    Field(String),

    /// Descend into a mapping by key, then into the sequence stored there
    /// by zero-based position.
    Index { field: String, position: usize },
}

impl PathSegment {
    /// Returns the field name this segment descends through.
    pub fn field(&self) -> &str {
        match self {
            PathSegment::Field(name) => name,
            PathSegment::Index { field, .. } => field,
        }
    }
}

/// Parses a raw path expression into an ordered list of segments.
///
/// # Arguments
///
/// * `raw` - A path expression such as `"user.addresses[0].city"`
///
/// # Returns
///
/// The parsed segments, or `DocumentError::MalformedPath` if the
/// expression is empty, contains an empty segment token, or contains a
/// bracketed segment whose index is not a non-negative integer.
///
/// # Examples
///
/// ```
/// use apirun::document::{parse_path, PathSegment};
///
/// let path = parse_path("items[2].id").unwrap();
/// assert_eq!(path[0], PathSegment::Index { field: "items".to_string(), position: 2 });
/// assert_eq!(path[1], PathSegment::Field("id".to_string()));
/// ```
pub fn parse_path(raw: &str) -> Result<Vec<PathSegment>, DocumentError> {
    if raw.is_empty() {
        return Err(DocumentError::MalformedPath("empty path".to_string()));
    }

    raw.split('.').map(parse_segment).collect()
}

/// Parses a single dot-separated token into a segment.
fn parse_segment(token: &str) -> Result<PathSegment, DocumentError> {
    if token.is_empty() {
        return Err(DocumentError::MalformedPath(
            "empty segment in path".to_string(),
        ));
    }

    let (open, close) = match (token.find('['), token.find(']')) {
        (None, None) => return Ok(PathSegment::Field(token.to_string())),
        (Some(open), Some(close)) if open < close => (open, close),
        _ => {
            return Err(DocumentError::MalformedPath(format!(
                "unbalanced brackets in segment '{}'",
                token
            )))
        }
    };

    // The index must be the entire bracketed portion and the brackets must
    // close the token; "items[0]x" is not a valid segment.
    if close != token.len() - 1 {
        return Err(DocumentError::MalformedPath(format!(
            "unexpected characters after ']' in segment '{}'",
            token
        )));
    }

    let field = &token[..open];
    if field.is_empty() {
        return Err(DocumentError::MalformedPath(format!(
            "missing field name before '[' in segment '{}'",
            token
        )));
    }

    let index_str = &token[open + 1..close];
    let position = index_str.parse::<usize>().map_err(|_| {
        DocumentError::MalformedPath(format!(
            "index '{}' in segment '{}' is not a non-negative integer",
            index_str, token
        ))
    })?;

    Ok(PathSegment::Index {
        field: field.to_string(),
        position,
    })
}
