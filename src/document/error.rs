//! Error types for document path resolution and traversal.
//!
//! These errors cover the full lifecycle of a path: parsing the raw
//! expression, walking it through a document, and writing at its terminal
//! segment. All of them abort the current run; the workflow engine never
//! retries a failed traversal.

use std::fmt;

/// Errors raised while parsing or applying a document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The raw path expression could not be parsed.
    ///
    /// Raised for empty paths, empty segment tokens, and bracketed
    /// segments whose index is not a non-negative integer.
    MalformedPath(String),

    /// A segment addressed a key that is absent, or the node reached at a
    /// segment does not have the shape the segment requires (e.g. indexing
    /// into a scalar).
    PathNotFound(String),

    /// An array segment's position is outside the bounds of the sequence
    /// it addresses.
    IndexOutOfRange { field: String, index: usize, len: usize },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::MalformedPath(msg) => write!(f, "Malformed path: {}", msg),
            DocumentError::PathNotFound(msg) => write!(f, "Path not found: {}", msg),
            DocumentError::IndexOutOfRange { field, index, len } => write!(
                f,
                "Index {} out of range for '{}' (length {})",
                index, field, len
            ),
        }
    }
}

impl std::error::Error for DocumentError {}
