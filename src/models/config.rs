//! Runner configuration.
//!
//! Loaded from a `.apirun.yaml` file in the working directory (or a path
//! given on the command line). Carries the settings that apply to every
//! call in a run: headers attached to all requests, where formatted
//! responses are written, and the request timeout.

use serde::Deserialize;
use std::collections::HashMap;

fn default_output_location() -> String {
    "response.json".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// Global settings for a run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// File the formatted response document is written to after each
    /// step.
    #[serde(default = "default_output_location", rename = "outputLocation")]
    pub output_location: String,

    /// Headers attached to every request, after per-call headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms", rename = "timeoutMs")]
    pub timeout_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            output_location: default_output_location(),
            headers: HashMap::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl RunnerConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is usable, or a message describing
    /// the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("timeoutMs must be greater than 0".to_string());
        }

        if self.output_location.is_empty() {
            return Err("outputLocation must not be empty".to_string());
        }

        Ok(())
    }
}
