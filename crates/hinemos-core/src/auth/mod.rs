//! Authentication for the Hinemos REST API.
//!
//! This module provides `Session`: a single bearer token with absolute
//! expiry, checked lazily and renewed by logging in again with the
//! configured credentials.

pub mod session;

pub use session::{parse_expiration, Session, SessionStatus};
