//! Token session for the Hinemos manager.
//!
//! The manager issues a bearer token with an absolute expiration timestamp
//! at login. `Session` keeps that token, answers whether it is still usable,
//! and logs in again when it is not.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Duration, Local, NaiveDateTime};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::config::Credentials;

// ============================================================================
// Constants
// ============================================================================

/// Login endpoint, relative to the REST root.
pub const LOGIN_PATH: &str = "AccessRestEndpoints/access/login";

/// Buffer time before expiry to trigger a new login (5 minutes).
/// A token this close to expiry could lapse while a request is in flight.
const TOKEN_REFRESH_BUFFER_MINUTES: i64 = 5;

/// Format of `expirationDate` in the login response, server local time.
const EXPIRATION_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<TokenInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfo {
    token_id: Option<String>,
    expiration_date: Option<String>,
}

/// Observable session state. `Expired` is only ever detected on query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Valid,
    Expired,
}

#[derive(Debug)]
struct SessionState {
    token: Option<String>,
    expiry: Option<NaiveDateTime>,
    headers: header::HeaderMap,
}

impl SessionState {
    fn new() -> Self {
        Self {
            token: None,
            expiry: None,
            headers: default_headers(),
        }
    }

    fn is_valid_at(&self, now: NaiveDateTime) -> bool {
        match (&self.token, self.expiry) {
            (Some(_), Some(expiry)) => {
                now < expiry - Duration::minutes(TOKEN_REFRESH_BUFFER_MINUTES)
            }
            _ => false,
        }
    }

    fn set(
        &mut self,
        token: Option<String>,
        authorization: Option<header::HeaderValue>,
        expiry: Option<NaiveDateTime>,
    ) {
        match authorization {
            Some(value) => self.headers.insert(header::AUTHORIZATION, value),
            None => self.headers.remove(header::AUTHORIZATION),
        };
        self.token = token;
        self.expiry = expiry;
    }

    fn clear(&mut self) {
        self.token = None;
        self.expiry = None;
        self.headers.remove(header::AUTHORIZATION);
    }
}

fn default_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );
    headers
}

/// `Bearer <token>` header value. Tokens that cannot travel in a header are
/// rejected rather than stored.
fn bearer_header(token: &str) -> Result<header::HeaderValue, ApiError> {
    let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
        ApiError::InvalidResponse("token contains characters not allowed in a header".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Parse an `expirationDate` value such as `2024-05-01 18:30:00.000`.
pub fn parse_expiration(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), EXPIRATION_FORMAT).ok()
}

/// Single-token session shared by every request made through one client.
///
/// State sits behind a `RwLock` so validity checks never wait on the network.
/// Logins are serialized by `login_gate`; a caller that waited on the gate
/// re-checks validity first, so a burst of requests against an expired token
/// results in one login.
pub struct Session {
    api_root: String,
    credentials: Credentials,
    http: Client,
    state: RwLock<SessionState>,
    login_gate: Mutex<()>,
}

impl Session {
    pub fn new(api_root: impl Into<String>, credentials: Credentials, http: Client) -> Self {
        Self {
            api_root: api_root.into(),
            credentials,
            http,
            state: RwLock::new(SessionState::new()),
            login_gate: Mutex::new(()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log in with the configured credentials and store the issued token.
    ///
    /// On failure the previous state is left untouched.
    pub async fn authenticate(&self) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.api_root, LOGIN_PATH);
        debug!(user = %self.credentials.user_id, "Logging in to Hinemos");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                user_id: &self.credentials.user_id,
                password: self.credentials.password(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Login rejected");
            return Err(match ApiError::from_status(status, &body) {
                ApiError::Unauthorized(msg) | ApiError::AccessDenied(msg) => {
                    ApiError::Authentication(msg)
                }
                other => other,
            });
        }

        let body = response.text().await?;
        let login: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("login response: {}", e)))?;
        let info = login.token.unwrap_or(TokenInfo {
            token_id: None,
            expiration_date: None,
        });

        let expiry = match info.expiration_date.as_deref() {
            Some(raw) => {
                let parsed = parse_expiration(raw);
                if parsed.is_none() {
                    warn!(expiration = raw, "Unrecognized token expiration format");
                }
                parsed
            }
            None => None,
        };
        if info.token_id.is_none() {
            warn!("Login response did not contain a token");
        }

        let authorization = info.token_id.as_deref().map(bearer_header).transpose()?;
        self.write().set(info.token_id, authorization, expiry);
        if let Some(expiry) = expiry {
            info!(expires_at = %expiry, "Logged in to Hinemos");
        }
        Ok(())
    }

    /// True iff a token is held and now is before `expiry - 5 minutes`.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Local::now().naive_local())
    }

    pub fn is_valid_at(&self, now: NaiveDateTime) -> bool {
        self.read().is_valid_at(now)
    }

    pub fn status(&self) -> SessionStatus {
        self.status_at(Local::now().naive_local())
    }

    pub fn status_at(&self, now: NaiveDateTime) -> SessionStatus {
        let state = self.read();
        if state.token.is_none() {
            SessionStatus::Unauthenticated
        } else if state.is_valid_at(now) {
            SessionStatus::Valid
        } else {
            SessionStatus::Expired
        }
    }

    pub fn expires_at(&self) -> Option<NaiveDateTime> {
        self.read().expiry
    }

    /// Drop the token. Safe to call any number of times.
    pub fn invalidate(&self) {
        self.write().clear();
    }

    /// Install a token obtained outside this session.
    pub fn install_token(
        &self,
        token: impl Into<String>,
        expiry: NaiveDateTime,
    ) -> Result<(), ApiError> {
        let token = token.into();
        let authorization = bearer_header(&token)?;
        self.write().set(Some(token), Some(authorization), Some(expiry));
        Ok(())
    }

    /// Ensure a usable token and return the headers to send with a request.
    ///
    /// Logs in at most once per call. If the token is still unusable right
    /// after a successful login the call fails without touching the network
    /// again.
    pub async fn ensure_authenticated(&self) -> Result<header::HeaderMap, ApiError> {
        if let Some(headers) = self.valid_headers() {
            return Ok(headers);
        }

        let _gate = self.login_gate.lock().await;
        // Another task may have logged in while we waited.
        if let Some(headers) = self.valid_headers() {
            return Ok(headers);
        }

        self.authenticate().await?;
        self.valid_headers().ok_or_else(|| {
            ApiError::Authentication("token is invalid or expired after login".to_string())
        })
    }

    fn valid_headers(&self) -> Option<header::HeaderMap> {
        let state = self.read();
        state
            .is_valid_at(Local::now().naive_local())
            .then(|| state.headers.clone())
    }

    #[cfg(test)]
    fn headers(&self) -> header::HeaderMap {
        self.read().headers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session() -> Session {
        Session::new(
            "http://127.0.0.1:9/HinemosWeb/api",
            Credentials::new("hinemos", "hinemos"),
            Client::new(),
        )
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_invalid_before_login() {
        let session = session();
        assert!(!session.is_valid());
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
        assert!(session.expires_at().is_none());
    }

    #[test]
    fn test_safety_margin_boundary() {
        let session = session();
        let expiry = at(12, 0, 0);
        session.install_token("abc", expiry).unwrap();

        assert!(session.is_valid_at(at(11, 54, 59)));
        assert!(!session.is_valid_at(at(11, 55, 0)));
        assert!(!session.is_valid_at(at(11, 58, 0)));
        assert!(!session.is_valid_at(at(12, 30, 0)));

        let just_before = at(11, 55, 0) - Duration::nanoseconds(1);
        assert!(session.is_valid_at(just_before));
    }

    #[test]
    fn test_status_transitions() {
        let session = session();
        session.install_token("abc", at(12, 0, 0)).unwrap();
        assert_eq!(session.status_at(at(11, 0, 0)), SessionStatus::Valid);
        assert_eq!(session.status_at(at(11, 56, 0)), SessionStatus::Expired);

        session.invalidate();
        assert_eq!(session.status_at(at(11, 0, 0)), SessionStatus::Unauthenticated);
    }

    #[test]
    fn test_invalidate_is_idempotent() {
        let session = session();
        session.invalidate();
        assert!(!session.is_valid());

        session.install_token("abc", Local::now().naive_local() + Duration::hours(1)).unwrap();
        assert!(session.is_valid());
        assert!(session.headers().contains_key(header::AUTHORIZATION));

        session.invalidate();
        session.invalidate();
        assert!(!session.is_valid());
        assert!(!session.headers().contains_key(header::AUTHORIZATION));
        assert!(session.headers().contains_key(header::ACCEPT));
    }

    #[test]
    fn test_bearer_header_installed() {
        let session = session();
        session.install_token("tok-123", at(12, 0, 0)).unwrap();
        let headers = session.headers();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer tok-123");
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_parse_expiration_formats() {
        assert_eq!(
            parse_expiration("2024-05-01 12:00:00.000"),
            Some(at(12, 0, 0))
        );
        assert_eq!(
            parse_expiration("2024-05-01 12:00:00.123456"),
            Some(at(12, 0, 0) + Duration::microseconds(123_456))
        );
        assert_eq!(parse_expiration("2024-05-01 12:00:00"), Some(at(12, 0, 0)));
        assert_eq!(parse_expiration("May 1st"), None);
    }

    #[test]
    fn test_install_rejects_token_unfit_for_header() {
        let session = session();
        let err = session.install_token("bad\ntoken", at(12, 0, 0)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
        assert!(!session.headers().contains_key(header::AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_state() {
        let session = session();
        let expiry = at(12, 0, 0);
        session.install_token("abc", expiry).unwrap();

        // Port 9 (discard) is not listening; the login fails at the transport.
        let err = session.authenticate().await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(session.expires_at(), Some(expiry));
        assert_eq!(session.status_at(at(11, 0, 0)), SessionStatus::Valid);
    }
}
