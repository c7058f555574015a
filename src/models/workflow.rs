//! Declarative workflow description.
//!
//! A workflow file is a YAML sequence of steps. Each step names a call
//! file, optional overrides applied to the call before it is sent, and
//! optional captures: response fragments stored in the environment for
//! later steps to reference through `{{ name }}` tags.
//!
//! ```yaml
//! - call: calls/login.yaml
//!   captures:
//!     authToken: token
//! - call: calls/create_user.yaml
//!   overrides:
//!     headers:
//!       Authorization: "Bearer {{ authToken }}"
//!     body:
//!       - path: user.name
//!         value: "{{ userName }}"
//! ```

use serde::Deserialize;
use std::collections::HashMap;

/// One body override: a templated value written at a path inside the
/// call's body document.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyOverride {
    /// Dotted/bracketed path addressing a location in the body value.
    pub path: String,

    /// Templated replacement value; tags are substituted before the
    /// override is applied.
    pub value: String,
}

/// Overrides applied to a call before the request is built.
///
/// Header and query overrides are flat name to templated-string maps
/// written directly into the call. Body overrides address nested fields
/// through the document mutator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallOverrides {
    /// Header name to templated value.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Query parameter name to templated value.
    #[serde(default, rename = "queryParameters")]
    pub query_parameters: HashMap<String, String>,

    /// Path-addressed overrides into the call body.
    #[serde(default)]
    pub body: Vec<BodyOverride>,
}

impl CallOverrides {
    /// Returns `true` if the step declares no overrides at all.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.query_parameters.is_empty() && self.body.is_empty()
    }
}

/// One step of a workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowStep {
    /// Path of the call file this step executes.
    pub call: String,

    /// Overrides applied before the request is built.
    #[serde(default)]
    pub overrides: CallOverrides,

    /// Capture name to response path; each capture runs the extractor
    /// against the decoded response and stores the result in the
    /// environment.
    #[serde(default)]
    pub captures: HashMap<String, String>,
}
