//! Tool layer: maps `(tool name, JSON arguments)` onto capability operations.
//!
//! - `ToolGroup`: one per capability module, exports descriptors and a
//!   single `call` entry point
//! - `ToolRegistry`: name → group index, built once at startup
//! - `ToolArgs`: typed extraction from the untyped argument bag
//! - `schema`: builder for tool input schemas

pub mod args;
pub mod calendar;
pub mod collect;
pub mod job;
pub mod monitor;
pub mod monitor_result;
pub mod registry;
pub mod repository;
pub mod schema;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::api::{ApiError, HinemosClient};

pub use args::ToolArgs;
pub use registry::{DispatchOutcome, RegistryError, ToolRegistry, ToolRegistryBuilder};

/// Registry-visible identity of one callable operation.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Result of a successful tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Json(Value),
    Binary {
        bytes: Vec<u8>,
        mime_type: String,
        file_name: Option<String>,
    },
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        ToolOutput::Json(value)
    }
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Missing required argument '{0}'")]
    MissingArgument(String),

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// A group was asked for a tool it does not implement.
    #[error("Tool '{0}' is not handled by this group")]
    NotHandled(String),
}

/// Adapter-side counterpart of one capability module.
pub trait ToolGroup: Send + Sync {
    /// Short name used in logs and registry errors.
    fn name(&self) -> &'static str;

    fn tools(&self) -> Vec<ToolDescriptor>;

    fn call<'a>(
        &'a self,
        tool: &'a str,
        client: &'a HinemosClient,
        args: ToolArgs,
    ) -> BoxFuture<'a, Result<ToolOutput, ToolError>>;
}
