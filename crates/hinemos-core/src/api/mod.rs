//! REST API client for the Hinemos manager.
//!
//! `HinemosClient` executes authenticated requests against
//! `{endpoint}/HinemosWeb/api/`. Domain operations are grouped into
//! borrowed capability views:
//!
//! - `repository()`: facilities, nodes, scopes
//! - `monitor()`: monitor settings
//! - `monitor_result()`: events and statuses
//! - `calendar()`: calendars and calendar patterns
//! - `collect()`: collected data and collection settings
//! - `job()`: jobs, kicks, sessions, queues
//!
//! Payloads are passed through as `serde_json::Value`.

pub mod calendar;
pub mod client;
pub mod collect;
pub mod error;
pub mod job;
pub mod monitor;
pub mod monitor_result;
pub mod repository;

pub use calendar::CalendarApi;
pub use client::{ApiRequest, HinemosClient};
pub use collect::CollectApi;
pub use error::ApiError;
pub use job::{JobApi, JobType, KickType, OperationCheck};
pub use monitor::{MonitorApi, MonitorKind};
pub use monitor_result::{EventComment, EventKey, MonitorResultApi, ScopeListQuery};
pub use repository::RepositoryApi;
