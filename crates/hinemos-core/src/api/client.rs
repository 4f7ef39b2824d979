//! REST client for the Hinemos manager.
//!
//! `HinemosClient` owns the HTTP connection pool and the token session.
//! Every capability module funnels its calls through `execute` (JSON) or
//! `download` (raw bytes), which make sure a valid token is held before
//! issuing exactly one HTTP request.

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::config::Config;

use super::{
    calendar::CalendarApi, collect::CollectApi, job::JobApi, monitor::MonitorApi,
    monitor_result::MonitorResultApi, repository::RepositoryApi, ApiError,
};

// ============================================================================
// Constants
// ============================================================================

/// Path from the manager base URL to the REST root.
const API_ROOT_PATH: &str = "HinemosWeb/api";

/// One call against the REST API, relative to the REST root.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter. Order is preserved on the wire.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present.
    pub fn query_opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// API client for the Hinemos manager.
/// Clone is cheap - the connection pool and session are shared.
#[derive(Clone)]
pub struct HinemosClient {
    http: Client,
    api_root: Arc<str>,
    session: Arc<Session>,
}

impl HinemosClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        let api_root: Arc<str> = format!("{}/{}", config.base_url(), API_ROOT_PATH).into();
        let session = Session::new(api_root.to_string(), config.credentials.clone(), http.clone());

        Ok(Self {
            http,
            api_root,
            session: Arc::new(session),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Drop the current token. The next request logs in again.
    pub fn close(&self) {
        self.session.invalidate();
    }

    pub fn repository(&self) -> RepositoryApi<'_> {
        RepositoryApi::new(self)
    }

    pub fn monitor(&self) -> MonitorApi<'_> {
        MonitorApi::new(self)
    }

    pub fn monitor_result(&self) -> MonitorResultApi<'_> {
        MonitorResultApi::new(self)
    }

    pub fn calendar(&self) -> CalendarApi<'_> {
        CalendarApi::new(self)
    }

    pub fn collect(&self) -> CollectApi<'_> {
        CollectApi::new(self)
    }

    pub fn job(&self) -> JobApi<'_> {
        JobApi::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    async fn send(&self, request: ApiRequest) -> Result<reqwest::Response, ApiError> {
        let headers = self.session.ensure_authenticated().await?;
        let url = self.url(&request.path);
        debug!(method = %request.method, path = %request.path, query = ?request.query, "Hinemos request");

        let mut builder = self.http.request(request.method.clone(), &url).headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Self::check_response(&request, response).await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(
        request: &ApiRequest,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "Hinemos request failed"
        );
        Err(ApiError::from_status(status, &body))
    }

    /// Execute a request and decode the JSON response.
    ///
    /// An empty body (including `204 No Content`) decodes to `Value::Null`.
    pub async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let path = request.path.clone();
        let response = self.send(request).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
        })
    }

    /// Execute a request and return the raw response body.
    pub async fn download(&self, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
        let response = self.send(request).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> HinemosClient {
        let config = Config::new("http://manager:8080/", "hinemos", "hinemos").unwrap();
        HinemosClient::new(&config).unwrap()
    }

    #[test]
    fn test_url_joins_api_root() {
        let client = client();
        assert_eq!(
            client.url("RepositoryRestEndpoints/repository/facility_tree"),
            "http://manager:8080/HinemosWeb/api/RepositoryRestEndpoints/repository/facility_tree"
        );
        assert_eq!(
            client.url("/JobRestEndpoints/job/queue"),
            "http://manager:8080/HinemosWeb/api/JobRestEndpoints/job/queue"
        );
    }

    #[test]
    fn test_request_builder_omits_absent_query() {
        let request = ApiRequest::get("x")
            .query("size", 10)
            .query_opt::<&str>("ownerRoleId", None)
            .query_opt("level", Some("NODE"));
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(
            request.query_pairs(),
            &[
                ("size".to_string(), "10".to_string()),
                ("level".to_string(), "NODE".to_string())
            ]
        );
        assert!(request.body().is_none());
    }

    #[test]
    fn test_request_builder_body() {
        let request = ApiRequest::post("x").json(json!({"a": 1}));
        assert_eq!(request.body(), Some(&json!({"a": 1})));
    }

    #[test]
    fn test_clones_share_session() {
        let a = client();
        let b = a.clone();
        a.session()
            .install_token("tok", chrono::Local::now().naive_local() + chrono::Duration::hours(1))
            .unwrap();
        assert!(b.session().is_valid());
        b.close();
        assert!(!a.session().is_valid());
    }
}
