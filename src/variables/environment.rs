//! Run-scoped store of captured values.
//!
//! The store maps capture names to values extracted from earlier
//! responses. It is created empty when a run starts, grows as each step's
//! captures execute, and is only ever read through tag substitution.
//! Execution is strictly sequential, so the store needs no locking; it is
//! threaded explicitly through the workflow engine rather than living in
//! process-wide state.

use serde_json::Value;
use std::collections::HashMap;

/// Named values captured from previous workflow steps.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentStore {
    values: HashMap<String, Value>,
}

impl EnvironmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a captured value under a name, silently overwriting any
    /// previous capture with the same name.
    pub fn put(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Looks up a captured value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the number of captured values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
