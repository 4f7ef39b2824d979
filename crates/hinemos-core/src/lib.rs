//! Core library for hinemos-mcp.
//!
//! - `config`: connection settings and credentials
//! - `auth`: token session with expiry tracking and coalesced re-login
//! - `api`: the REST client, request executor and per-domain capability modules
//! - `tools`: tool groups and the name-based dispatch registry
//! - `utils`: formatting helpers shared by the capability modules

pub mod api;
pub mod auth;
pub mod config;
pub mod tools;
pub mod utils;

pub use api::{ApiError, ApiRequest, HinemosClient};
pub use auth::{Session, SessionStatus};
pub use config::{Config, ConfigError, Credentials};
pub use tools::{DispatchOutcome, ToolDescriptor, ToolError, ToolOutput, ToolRegistry};
