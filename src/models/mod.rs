//! Data models for the declarative files the runner consumes.

pub mod call;
pub mod config;
pub mod workflow;

pub use call::{ApiCall, BodyKind, CallBody, Method};
pub use config::RunnerConfig;
pub use workflow::{BodyOverride, CallOverrides, WorkflowStep};
