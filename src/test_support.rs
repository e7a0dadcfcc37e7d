use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum::Router;

use crate::api::client::ApiClient;
use crate::nav::Navigator;
use crate::session::storage::SessionStorage;
use crate::session::SessionStore;

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) authorization: Option<String>,
    pub(crate) body: serde_json::Value,
}

struct StubState {
    responses: Mutex<HashMap<(String, String), (StatusCode, serde_json::Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process HTTP backend for client tests: canned responses keyed by
/// method and path, every request recorded for assertions.
pub(crate) struct StubBackend {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubBackend {
    pub(crate) async fn start() -> Self {
        let state = Arc::new(StubState {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(respond).with_state(state.clone());
        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend addr");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state, handle }
    }

    pub(crate) fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub(crate) fn on(
        &self,
        method: Method,
        path: &str,
        status: StatusCode,
        body: serde_json::Value,
    ) {
        self.state
            .responses
            .lock()
            .expect("responses lock")
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub(crate) fn last_request(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("at least one request")
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let parsed = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

    state.requests.lock().expect("requests lock").push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        authorization: headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string),
        body: parsed,
    });

    let canned = state
        .responses
        .lock()
        .expect("responses lock")
        .get(&(method.to_string(), path))
        .cloned();

    match canned {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => {
            (StatusCode::NOT_FOUND, Json(serde_json::json!({"message": "Not found"})))
                .into_response()
        }
    }
}

/// Fresh per-test storage directory; the pid and a counter keep parallel
/// tests apart.
pub(crate) fn temp_storage_dir() -> std::path::PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("eduquiz-test-{}-{unique}", std::process::id()))
}

pub(crate) struct TestClient {
    pub(crate) client: ApiClient,
    pub(crate) session: SessionStore,
    pub(crate) navigator: Navigator,
    pub(crate) storage_dir: std::path::PathBuf,
}

pub(crate) fn connect(backend: &StubBackend) -> TestClient {
    connect_with_storage(backend, temp_storage_dir())
}

pub(crate) fn connect_with_storage(
    backend: &StubBackend,
    storage_dir: std::path::PathBuf,
) -> TestClient {
    let session = SessionStore::new(SessionStorage::new(&storage_dir));
    session.init();
    let navigator = Navigator::new();
    let client = ApiClient::new(
        reqwest::Client::new(),
        backend.base_url(),
        session.clone(),
        navigator.clone(),
    );
    TestClient { client, session, navigator, storage_dir }
}

pub(crate) fn identity_json(role: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": "u1",
        "name": "Ada",
        "email": "ada@example.com",
        "role": role,
        "subjects": if role == "teacher" { vec!["Mathematics"] } else { Vec::new() }
    })
}

pub(crate) fn login_ok(backend: &StubBackend, role: &str, token: &str) {
    backend.on(
        Method::POST,
        "/auth/login",
        StatusCode::OK,
        serde_json::json!({
            "success": true,
            "user": identity_json(role),
            "token": token
        }),
    );
}
