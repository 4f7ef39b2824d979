//! In-process fake Hinemos manager.
//!
//! Serves the login endpoint plus a catch-all that records every API
//! request and answers with a canned response.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Local;
use serde_json::{json, Value};

use hinemos_core::{Config, HinemosClient};

pub const USER: &str = "hinemos";
pub const PASSWORD: &str = "hinemos";
const LOGIN_ROUTE: &str = "/HinemosWeb/api/AccessRestEndpoints/access/login";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Canned answer for API requests.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Bytes(&'static str, Vec<u8>),
    Empty,
}

/// How the login route answers valid credentials.
#[derive(Debug, Clone)]
pub enum LoginReply {
    /// Issue `token-N` expiring this far from now.
    Issue(chrono::Duration),
    /// Answer with a fixed status and raw body.
    Raw(StatusCode, String),
}

struct FakeState {
    logins: AtomicUsize,
    login_delay: Mutex<Duration>,
    login_reply: Mutex<LoginReply>,
    requests: Mutex<Vec<RecordedRequest>>,
    reply: Mutex<Reply>,
}

pub struct FakeHinemos {
    pub addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeHinemos {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState {
            logins: AtomicUsize::new(0),
            login_delay: Mutex::new(Duration::ZERO),
            login_reply: Mutex::new(LoginReply::Issue(chrono::Duration::hours(1))),
            requests: Mutex::new(Vec::new()),
            reply: Mutex::new(Reply::Json(StatusCode::OK, json!([]))),
        });

        let app = Router::new()
            .route(LOGIN_ROUTE, post(login))
            .fallback(api)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> HinemosClient {
        let config = Config::new(&self.endpoint(), USER, PASSWORD).unwrap();
        HinemosClient::new(&config).unwrap()
    }

    pub fn logins(&self) -> usize {
        self.state.logins.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no API request recorded")
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.state.reply.lock().unwrap() = reply;
    }

    pub fn set_login_reply(&self, reply: LoginReply) {
        *self.state.login_reply.lock().unwrap() = reply;
    }

    pub fn set_login_delay(&self, delay: Duration) {
        *self.state.login_delay.lock().unwrap() = delay;
    }
}

async fn login(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    let delay = *state.login_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    if body["userId"] != USER || body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid user or password"})),
        )
            .into_response();
    }

    let n = state.logins.fetch_add(1, Ordering::SeqCst) + 1;
    let lifetime = match state.login_reply.lock().unwrap().clone() {
        LoginReply::Issue(lifetime) => lifetime,
        LoginReply::Raw(status, body) => {
            return (status, [(header::CONTENT_TYPE, "application/json")], body).into_response();
        }
    };
    let expiry = Local::now().naive_local() + lifetime;
    Json(json!({
        "token": {
            "tokenId": format!("token-{}", n),
            "expirationDate": expiry.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
        }
    }))
    .into_response()
}

async fn api(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect::<Vec<(String, String)>>()
        })
        .unwrap_or_default();
    let recorded = RecordedRequest {
        method,
        path: uri.path().to_string(),
        query,
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    state.requests.lock().unwrap().push(recorded);

    let reply = state.reply.lock().unwrap().clone();
    match reply {
        Reply::Json(status, value) => (status, Json(value)).into_response(),
        Reply::Bytes(content_type, bytes) => {
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Reply::Empty => StatusCode::NO_CONTENT.into_response(),
    }
}
