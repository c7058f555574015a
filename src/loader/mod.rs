//! Loading of the declarative YAML files.
//!
//! Three file shapes exist: a call file (one [`ApiCall`]), a workflow
//! file (a sequence of [`WorkflowStep`]s), and the runner configuration.
//! Loading is plain synchronous I/O; all parse and I/O failures are
//! terminal for the run.

use crate::models::{ApiCall, RunnerConfig, WorkflowStep};
use std::fmt;
use std::fs;
use std::path::Path;

/// Errors raised while reading or parsing a declarative file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io { path: String, message: String },

    /// The file content is not valid YAML for the expected shape.
    Parse { path: String, message: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, message } => {
                write!(f, "Failed to read '{}': {}", path, message)
            }
            LoadError::Parse { path, message } => {
                write!(f, "Failed to parse '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Reads a file and deserializes it as YAML.
fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let data = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_yaml::from_str(&data).map_err(|e| LoadError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Loads a call file.
pub fn load_call(path: &Path) -> Result<ApiCall, LoadError> {
    load_yaml(path)
}

/// Loads a workflow file: an ordered sequence of steps.
pub fn load_workflow(path: &Path) -> Result<Vec<WorkflowStep>, LoadError> {
    load_yaml(path)
}

/// Loads the runner configuration.
///
/// A missing config file is not an error; defaults apply. An unreadable
/// or unparseable file still fails, as does a config that fails
/// validation.
pub fn load_config(path: &Path) -> Result<RunnerConfig, LoadError> {
    if !path.exists() {
        log::debug!("No config file at '{}', using defaults", path.display());
        return Ok(RunnerConfig::default());
    }

    let config: RunnerConfig = load_yaml(path)?;

    config.validate().map_err(|message| LoadError::Parse {
        path: path.display().to_string(),
        message,
    })?;

    Ok(config)
}
