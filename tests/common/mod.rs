#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::Response,
    routing::post,
    Json, Router,
};
use recruitment_intake::{
    config::DatabaseConfig, database::candidate_store::CandidateStore, routes,
    services::legacy_service::LegacyNotifier, AppState,
};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::ServiceExt;

/// What the stand-in legacy endpoint saw for one request.
#[derive(Debug, Clone)]
pub struct LegacyHit {
    pub content_type: Option<String>,
    pub body: JsonValue,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    delay: Duration,
    hits: mpsc::UnboundedSender<LegacyHit>,
}

async fn record_hit(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> StatusCode {
    tokio::time::sleep(stub.delay).await;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let _ = stub.hits.send(LegacyHit { content_type, body });
    stub.status
}

/// Starts a throwaway legacy endpoint on an ephemeral port and returns its
/// `/candidates` URL together with the stream of requests it receives.
pub async fn spawn_legacy_stub(
    status: StatusCode,
    delay: Duration,
) -> (String, mpsc::UnboundedReceiver<LegacyHit>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .route("/candidates", post(record_hit))
        .with_state(StubState {
            status,
            delay,
            hits: tx,
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    (format!("http://{}/candidates", addr), rx)
}

/// An address nothing listens on.
pub fn unreachable_legacy_url() -> String {
    "http://127.0.0.1:9/candidates".to_string()
}

pub async fn setup_app(legacy_url: Option<String>, timeout: Duration) -> (Router, CandidateStore) {
    let store = CandidateStore::connect(&DatabaseConfig::in_memory())
        .await
        .expect("store");
    let notifier = LegacyNotifier::new(legacy_url, timeout).expect("notifier");
    let state = AppState::new(store.clone(), Arc::new(notifier));
    (routes::router(state), store)
}

pub fn candidate_body(email: &str) -> JsonValue {
    json!({
        "firstName": "Jan",
        "lastName": "Kowalski",
        "email": email,
        "phone": "123456789",
        "experienceYears": 5,
        "notes": "Strong candidate",
        "status": "new",
        "consentDate": "2025-10-29",
        "offers": [1, 2]
    })
}

pub async fn post_candidate(app: &Router, body: &JsonValue) -> Response {
    let req = Request::builder()
        .method("POST")
        .uri("/candidates")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn json_body(resp: Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
