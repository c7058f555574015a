//! Response output formatting and persistence.
//!
//! After each step the decoded response document is pretty-printed with
//! 4-space indentation and written to the configured output file,
//! replacing the previous step's output.

use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Errors raised while formatting or writing response output.
#[derive(Debug)]
pub enum OutputError {
    /// The document could not be serialized.
    Serialize(String),

    /// The output file could not be written.
    Io { path: String, message: String },
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Serialize(msg) => write!(f, "Failed to serialize response: {}", msg),
            OutputError::Io { path, message } => {
                write!(f, "Failed to write output to '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for OutputError {}

/// Pretty-prints a document with 4-space indentation.
pub fn format_document(doc: &Value) -> Result<String, OutputError> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);

    doc.serialize(&mut serializer)
        .map_err(|e| OutputError::Serialize(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| OutputError::Serialize(e.to_string()))
}

/// Formats a response document and writes it to `path`.
pub fn write_response(doc: &Value, path: &Path) -> Result<(), OutputError> {
    let formatted = format_document(doc)?;

    fs::write(path, formatted).map_err(|e| OutputError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
