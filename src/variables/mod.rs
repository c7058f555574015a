//! Captured values and tag substitution.
//!
//! Workflow steps capture fragments of earlier responses into an
//! [`EnvironmentStore`] and reference them from later override values
//! through `{{ name }}` tags resolved by [`substitute`].

pub mod environment;
pub mod substitution;

pub use environment::EnvironmentStore;
pub use substitution::{substitute, VariableError};
