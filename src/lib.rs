//! Declarative HTTP call runner.
//!
//! API calls and multi-step workflows are described in YAML files and
//! executed against a remote service. Steps can capture fragments of a
//! response into a run-scoped environment and reference them from later
//! steps through `{{ name }}` tags, so a login step's token can flow into
//! the headers or body of everything that follows.
//!
//! # Architecture
//!
//! - **document**: the path syntax (`name.name[idx].name`) and the
//!   read/write operations over untyped document trees
//! - **variables**: the environment store of captured values and the tag
//!   substitution engine
//! - **models**: serde data models for call, workflow, and config files
//! - **loader**: reads and deserializes the YAML files
//! - **executor**: builds and performs the HTTP exchange with reqwest
//! - **output**: pretty-prints responses and writes them to disk
//! - **workflow**: the step loop tying everything together
//!
//! # Example workflow
//!
//! ```yaml
//! - call: calls/login.yaml
//!   captures:
//!     authToken: token
//! - call: calls/profile.yaml
//!   overrides:
//!     headers:
//!       Authorization: "Bearer {{ authToken }}"
//! ```
//!
//! Each step executes strictly after the previous one; a failure in any
//! phase (loading, substitution, mutation, request, capture) aborts the
//! whole run before the next request is issued.

pub mod document;
pub mod executor;
pub mod loader;
pub mod models;
pub mod output;
pub mod variables;
pub mod workflow;

pub use document::{extract, mutate, parse_path, DocumentError, PathSegment};
pub use models::{ApiCall, RunnerConfig, WorkflowStep};
pub use variables::{substitute, EnvironmentStore, VariableError};
pub use workflow::{run_single, run_workflow, RunnerError};
