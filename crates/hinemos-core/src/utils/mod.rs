//! Formatting helpers for request parameters and bodies.

pub mod format;

pub use format::{join_ids, normalize_datetime_fields, to_hinemos_datetime};
