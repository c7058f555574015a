//! Workflow execution.
//!
//! Drives the step loop: for each step, load the referenced call file,
//! substitute tags in the override values and apply them to the call,
//! execute the request, decode the response as JSON, run the declared
//! captures into the environment store, and write the formatted response
//! to the output file.
//!
//! Overrides are fully substituted and written into the call before the
//! HTTP request is built. Steps run strictly one after another; any
//! failure aborts the run immediately, since later steps may depend on
//! the captures of earlier ones. There is no partial-success mode.

use crate::document::{extract, mutate, parse_path, DocumentError};
use crate::executor::{self, RequestError};
use crate::loader::{self, LoadError};
use crate::models::{ApiCall, CallOverrides, RunnerConfig};
use crate::output::{self, OutputError};
use crate::variables::{substitute, EnvironmentStore, VariableError};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Top-level error for a run. Every variant is terminal: the runner
/// halts before issuing any further requests.
#[derive(Debug)]
pub enum RunnerError {
    /// Path parsing or traversal failed.
    Document(DocumentError),

    /// A tag referenced an unknown capture.
    Variable(VariableError),

    /// A declarative file could not be read or parsed.
    Load(LoadError),

    /// The HTTP exchange failed.
    Request(RequestError),

    /// The response body is not valid JSON.
    Decode(String),

    /// Writing the formatted response failed.
    Output(OutputError),

    /// A step declared body overrides but its call has no body.
    OverrideWithoutBody { call: String },
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunnerError::Document(e) => write!(f, "{}", e),
            RunnerError::Variable(e) => write!(f, "{}", e),
            RunnerError::Load(e) => write!(f, "{}", e),
            RunnerError::Request(e) => write!(f, "{}", e),
            RunnerError::Decode(msg) => write!(f, "Failed to decode response as JSON: {}", msg),
            RunnerError::Output(e) => write!(f, "{}", e),
            RunnerError::OverrideWithoutBody { call } => {
                write!(f, "Call '{}' has no body to apply body overrides to", call)
            }
        }
    }
}

impl std::error::Error for RunnerError {}

impl From<DocumentError> for RunnerError {
    fn from(e: DocumentError) -> Self {
        RunnerError::Document(e)
    }
}

impl From<VariableError> for RunnerError {
    fn from(e: VariableError) -> Self {
        RunnerError::Variable(e)
    }
}

impl From<LoadError> for RunnerError {
    fn from(e: LoadError) -> Self {
        RunnerError::Load(e)
    }
}

impl From<RequestError> for RunnerError {
    fn from(e: RequestError) -> Self {
        RunnerError::Request(e)
    }
}

impl From<OutputError> for RunnerError {
    fn from(e: OutputError) -> Self {
        RunnerError::Output(e)
    }
}

/// Substitutes and applies a step's overrides to a loaded call.
///
/// Header and query overrides are flat name-to-value maps: each value is
/// tag-substituted and then inserted (or replaced) directly. Body
/// overrides go through the shared path syntax: the templated value is
/// substituted, the path parsed, and the result written into the call's
/// body document in place.
pub fn apply_overrides(
    call: &mut ApiCall,
    overrides: &CallOverrides,
    env: &EnvironmentStore,
) -> Result<(), RunnerError> {
    for (name, templated) in &overrides.headers {
        let value = substitute(templated, env)?;
        call.headers.insert(name.clone(), value);
    }

    for (name, templated) in &overrides.query_parameters {
        let value = substitute(templated, env)?;
        call.query_parameters.insert(name.clone(), value);
    }

    if overrides.body.is_empty() {
        return Ok(());
    }

    let body = call
        .body
        .as_mut()
        .ok_or_else(|| RunnerError::OverrideWithoutBody {
            call: call.url.clone(),
        })?;

    for body_override in &overrides.body {
        let value = substitute(&body_override.value, env)?;
        let path = parse_path(&body_override.path)?;
        mutate(&mut body.value, &path, Value::String(value))?;
    }

    Ok(())
}

/// Decodes a raw response body as a JSON document.
fn decode_response(body: &[u8]) -> Result<Value, RunnerError> {
    serde_json::from_slice(body).map_err(|e| RunnerError::Decode(e.to_string()))
}

/// Runs each declared capture against the decoded response, storing the
/// extracted values in the environment. Captures are independent keys;
/// their ordering does not matter.
fn capture_fields(
    doc: &Value,
    captures: &std::collections::HashMap<String, String>,
    env: &mut EnvironmentStore,
) -> Result<(), RunnerError> {
    for (name, raw_path) in captures {
        let path = parse_path(raw_path)?;
        let value = extract(doc, &path)?.clone();
        log::debug!("captured '{}' from '{}'", name, raw_path);
        env.put(name.clone(), value);
    }

    Ok(())
}

/// Executes a workflow file from start to finish.
///
/// Call paths inside the workflow are resolved relative to the workflow
/// file's directory. The environment store lives for the whole run and
/// grows monotonically as captures execute.
///
/// # Arguments
///
/// * `workflow_path` - Path of the workflow YAML file
/// * `config` - Runner configuration
///
/// # Returns
///
/// `Ok(())` when every step completed, or the first error encountered.
pub async fn run_workflow(workflow_path: &Path, config: &RunnerConfig) -> Result<(), RunnerError> {
    let steps = loader::load_workflow(workflow_path)?;
    let base_dir = workflow_path.parent().unwrap_or_else(|| Path::new("."));
    let mut env = EnvironmentStore::new();

    for (index, step) in steps.iter().enumerate() {
        log::info!("step {}/{}: {}", index + 1, steps.len(), step.call);

        let mut call = loader::load_call(&base_dir.join(&step.call))?;
        apply_overrides(&mut call, &step.overrides, &env)?;

        let response = executor::execute(&call, config).await?;
        if !response.is_success() {
            log::warn!("step {}/{}: {} returned status {}", index + 1, steps.len(), step.call, response.status);
        }
        let doc = decode_response(&response.body)?;

        capture_fields(&doc, &step.captures, &mut env)?;
        if !step.captures.is_empty() {
            log::debug!("environment holds {} captures", env.len());
        }
        output::write_response(&doc, Path::new(&config.output_location))?;
    }

    Ok(())
}

/// Executes a single call file, with no overrides or captures.
pub async fn run_single(call_path: &Path, config: &RunnerConfig) -> Result<(), RunnerError> {
    let call = loader::load_call(call_path)?;

    let response = executor::execute(&call, config).await?;
    if !response.is_success() {
        log::warn!("{} returned status {}", call.url, response.status);
    }
    let doc = decode_response(&response.body)?;

    output::write_response(&doc, Path::new(&config.output_location))?;

    Ok(())
}
