//! Mock Snyk API shared by the integration tests.
//!
//! An axum router on a background tokio runtime answers every request with
//! the next canned response and records what the client sent, so tests can
//! run the real blocking client without the network.

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use tokio::{net::TcpListener, runtime::Runtime};

/// A response the server will send back.
pub struct Canned {
    pub status: u16,
    pub body: String,
}

impl Canned {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// A request the client sent.
#[derive(Debug)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> &str {
        self.target.split_once('?').map(|(_, q)| q).unwrap_or_default()
    }
}

#[derive(Default)]
struct MockState {
    responses: Mutex<VecDeque<Canned>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct TestServer {
    pub base_url: String,
    state: Arc<MockState>,

    /// Dropping the runtime shuts the server down.
    _runtime: Runtime,
}

impl TestServer {
    /// Start a server that answers the given responses in order. Requests
    /// past the last canned response get a 503.
    pub fn start(responses: Vec<Canned>) -> Self {
        Self::start_with(|_| responses)
    }

    /// Like [`TestServer::start`], for responses that need the server's own
    /// base URL (absolute pagination links).
    pub fn start_with(responses: impl FnOnce(&str) -> Vec<Canned>) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("Failed to build test runtime");

        let listener = runtime
            .block_on(TcpListener::bind("127.0.0.1:0"))
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");
        let base_url = format!("http://{addr}");

        let state = Arc::new(MockState::default());
        state
            .responses
            .lock()
            .unwrap()
            .extend(responses(&base_url));

        let app = Router::new().fallback(respond).with_state(Arc::clone(&state));
        runtime.spawn(async move { axum::serve(listener, app).await });

        Self {
            base_url,
            state,
            _runtime: runtime,
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.state.requests.lock().unwrap())
    }
}

async fn respond(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);

    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        target,
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let next = state.responses.lock().unwrap().pop_front();
    match next {
        Some(canned) => (
            StatusCode::from_u16(canned.status).unwrap(),
            [(CONTENT_TYPE, "application/vnd.api+json")],
            canned.body,
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "no canned response left").into_response(),
    }
}

/// A JSON:API project list page.
pub fn projects_page(projects: &[(&str, &str, &str)], next: Option<&str>) -> String {
    let data: Vec<serde_json::Value> = projects
        .iter()
        .map(|(id, name, project_type)| {
            serde_json::json!({
                "id": id,
                "type": "project",
                "attributes": {
                    "name": name,
                    "type": project_type,
                    "settings": { "recurring_tests": { "frequency": "daily" } }
                }
            })
        })
        .collect();

    let links = match next {
        Some(next) => serde_json::json!({ "next": next }),
        None => serde_json::json!({}),
    };

    serde_json::json!({ "data": data, "links": links }).to_string()
}

/// A successful PATCH response body.
pub fn updated_body(id: &str) -> String {
    serde_json::json!({ "data": { "id": id, "type": "project", "attributes": {} } }).to_string()
}
