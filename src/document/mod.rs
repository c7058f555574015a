//! Path-addressed access to untyped document trees.
//!
//! A document is a `serde_json::Value`: nested mappings, sequences, and
//! scalars, as produced by decoding a response body or a declarative call
//! body. This module defines the one path syntax the whole tool speaks —
//! `name.name[idx].name` — and the read/write operations over it:
//!
//! - [`parse_path`] turns a raw expression into [`PathSegment`]s
//! - [`extract`] reads the value at a path (response captures)
//! - [`mutate`] overwrites the value at a path in place (body overrides)
//!
//! Captures and overrides share the syntax deliberately: a path used to
//! read a field out of one response can be reused unchanged to write into
//! the next request.

pub mod error;
pub mod extract;
pub mod mutate;
pub mod path;

pub use error::DocumentError;
pub use extract::extract;
pub use mutate::mutate;
pub use path::{parse_path, PathSegment};
