//! HTTP adapters against an in-process stub backend.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use cardvote_core::content::{ContentGateway, ContentSource, VoteDirection};
use cardvote_core::panel::PanelKind;
use cardvote_core::user::AuthBackend;
use cardvote_infrastructure::{
    ApiClient, HttpAuthBackend, HttpContentGateway, MemoryStore, MockSessionStore,
};

const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Default)]
struct StubState {
    votes: Arc<Mutex<Vec<Value>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "Bearer srv-token")
        .unwrap_or(false)
}

async fn random() -> Json<Value> {
    Json(json!({
        "source": "pokemon",
        "sourceId": "25",
        "name": "Pikachu",
        "image": "https://img.example/25.png"
    }))
}

async fn vote(State(state): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    state.votes.lock().unwrap().push(body);
    Json(json!({"success": true, "message": "Vote registered"}))
}

async fn top_like(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({
        "item": {
            "source": "superhero",
            "sourceId": "70",
            "name": "Batman",
            "image": "https://img.example/70.png",
            "likes": 42,
            "dislikes": 1,
            "lastEvaluatedAt": "2025-03-01T12:00:00Z"
        }
    })))
}

async fn top_dislike(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({"item": null})))
}

async fn last_evaluated() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] == "pw1" {
        (
            StatusCode::OK,
            Json(json!({
                "accessToken": "srv-token",
                "user": {"email": body["email"], "name": "Server Alice"}
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Bad credentials"})),
        )
    }
}

async fn stalled() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(30)).await;
    Json(json!({}))
}

async fn register() -> (StatusCode, Json<Value>) {
    (StatusCode::CONFLICT, Json(json!({"message": "Email taken"})))
}

async fn spawn_stub() -> (SocketAddr, StubState) {
    let state = StubState::default();
    let app = Router::new()
        .route("/api/v1/characters/random", get(random))
        .route("/api/v1/characters/vote", post(vote))
        .route("/api/v1/characters/top-like", get(top_like))
        .route("/api/v1/characters/top-dislike", get(top_dislike))
        .route("/api/v1/characters/last-evaluated", get(last_evaluated))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/register", post(register))
        .route("/stalled/api/v1/characters/random", get(stalled))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

fn gateway(addr: SocketAddr) -> HttpContentGateway {
    let store = MockSessionStore::new(Arc::new(MemoryStore::new()));
    HttpContentGateway::new(ApiClient::new(format!("http://{addr}/"), TIMEOUT).unwrap(), store)
}

#[tokio::test]
async fn test_random_item_and_vote() {
    let (addr, state) = spawn_stub().await;
    let gateway = gateway(addr);

    let item = gateway.fetch_random_item().await.unwrap();
    assert_eq!(item.source, ContentSource::Pokemon);
    assert_eq!(item.source_id, "25");

    let outcome = gateway.submit_vote(&item, VoteDirection::Dislike).await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.message, "Vote registered");

    let votes = state.votes.lock().unwrap().clone();
    assert_eq!(
        votes,
        vec![json!({
            "source": "pokemon",
            "sourceId": "25",
            "name": "Pikachu",
            "image": "https://img.example/25.png",
            "vote": "dislike"
        })]
    );
}

#[tokio::test]
async fn test_leaderboards_send_bearer_token() {
    let (addr, _) = spawn_stub().await;
    let gateway = gateway(addr);

    let top = gateway.fetch_top_liked("srv-token").await.unwrap().unwrap();
    assert_eq!(top.item.name, "Batman");
    assert_eq!(top.likes, 42);

    assert!(gateway.fetch_panel(PanelKind::TopDislike, "srv-token").await.unwrap().is_none());

    let err = gateway.fetch_top_liked("stale").await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    let err = gateway.fetch_last_evaluated("srv-token").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = gateway(addr).fetch_random_item().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_stalled_backend_hits_request_timeout() {
    let (addr, _) = spawn_stub().await;
    let store = MockSessionStore::new(Arc::new(MemoryStore::new()));
    let api = ApiClient::new(format!("http://{addr}/stalled"), Duration::from_millis(200)).unwrap();
    let gateway = HttpContentGateway::new(api, store);

    let started = std::time::Instant::now();
    let err = gateway.fetch_random_item().await.unwrap_err();

    assert!(err.is_transport());
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_reactions_are_local() {
    let (addr, _) = spawn_stub().await;
    let gateway = gateway(addr);
    let item = gateway.fetch_random_item().await.unwrap();

    gateway.record_reaction("a@x.com", &item, VoteDirection::Like).await;

    assert!(gateway.get_user_likes("a@x.com").await.contains("pokemon:25"));
    assert!(gateway.get_user_dislikes("a@x.com").await.is_empty());
    assert!(gateway.get_user_likes("b@x.com").await.is_empty());
}

#[tokio::test]
async fn test_remote_auth() {
    let (addr, _) = spawn_stub().await;
    let backend = HttpAuthBackend::new(ApiClient::new(format!("http://{addr}"), TIMEOUT).unwrap());

    let outcome = backend.login("a@x.com", "pw1").await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.token.as_deref(), Some("srv-token"));
    assert_eq!(outcome.user.unwrap().display_name, "Server Alice");

    let err = backend.login("a@x.com", "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.server_message().as_deref(), Some("Bad credentials"));

    let err = backend.register("a@x.com", "A", "pw1").await.unwrap_err();
    assert_eq!(err.server_message().as_deref(), Some("Email taken"));
}
