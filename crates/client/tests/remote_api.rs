use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::CONTENT_TYPE};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use stockroom_auth::{LOGIN_ROUTE, RecordingNavigator, Session};
use stockroom_client::{ApiClient, AppState, ClientConfig, RemoteItemClient};
use stockroom_core::ClientError;
use stockroom_inventory::Item;

/// In-process stand-in for the PHP backend.
#[derive(Default)]
struct Backend {
    items: Mutex<Vec<Value>>,
    /// (endpoint, Content-Type header) for every request received.
    content_types: Mutex<Vec<(&'static str, Option<String>)>>,
    login_bodies: Mutex<Vec<Value>>,
    broken_reads: AtomicBool,
}

type Shared = Arc<Backend>;

impl Backend {
    fn record(&self, endpoint: &'static str, headers: &HeaderMap) {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self.content_types
            .lock()
            .unwrap()
            .push((endpoint, content_type));
    }
}

fn id_key(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Item not found" })))
}

async fn read(State(backend): State<Shared>, headers: HeaderMap) -> Result<Json<Value>, String> {
    backend.record("read", &headers);
    if backend.broken_reads.load(Ordering::SeqCst) {
        return Err("<html>Fatal error</html>".to_string());
    }
    Ok(Json(Value::Array(backend.items.lock().unwrap().clone())))
}

async fn create(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(item): Json<Value>,
) -> Json<Value> {
    backend.record("create", &headers);
    backend.items.lock().unwrap().push(item.clone());
    Json(item)
}

async fn update(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(item): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    backend.record("update", &headers);
    let mut items = backend.items.lock().unwrap();
    let slot = items
        .iter_mut()
        .find(|i| i["id"] == item["id"])
        .ok_or_else(not_found)?;
    *slot = item.clone();
    Ok(Json(item))
}

async fn remove(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    backend.record("delete", &headers);
    let id = body["id"].as_str().unwrap_or_default().to_string();
    let mut items = backend.items.lock().unwrap();
    let index = items
        .iter()
        .position(|i| id_key(&i["id"]) == id)
        .ok_or_else(not_found)?;
    items.remove(index);
    Ok(StatusCode::OK)
}

async fn login(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    backend.record("login", &headers);
    backend.login_bodies.lock().unwrap().push(body.clone());

    if body["password"] != "pw" {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        ));
    }

    let email = body["email"].as_str().unwrap_or_default();
    let role = if email.starts_with("admin") { "admin" } else { "user" };
    Ok(Json(json!({
        "message": "Login successful",
        "user": { "id": 1, "name": "Ada", "email": email, "role": role }
    })))
}

async fn register(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record("register", &headers);
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": { "id": 7, "name": body["name"], "email": body["email"], "role": "admin" }
        })),
    )
}

struct StubBackend {
    base_url: String,
    backend: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl StubBackend {
    async fn spawn() -> Self {
        let backend = Shared::default();
        let app = Router::new()
            .route("/api/endpoints/read.php", get(read))
            .route("/api/endpoints/create.php", post(create))
            .route("/api/endpoints/update.php", put(update))
            .route("/api/endpoints/delete.php", delete(remove))
            .route("/api/endpoints/login.php", post(login))
            .route("/api/endpoints/register.php", post(register))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            backend,
            handle,
        }
    }

    fn items_client(&self) -> RemoteItemClient {
        RemoteItemClient::new(ApiClient::new(self.base_url.clone()).unwrap())
    }

    fn app(&self, data_dir: &std::path::Path) -> AppState {
        AppState::new(ClientConfig::new(self.base_url.clone(), data_dir)).unwrap()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn bolt(name: &str) -> Item {
    Item::new(1_i64).with_field("name", name).with_field("quantity", 40)
}

#[tokio::test]
async fn item_crud_round_trip() {
    let stub = StubBackend::spawn().await;
    let items = stub.items_client();

    assert!(items.list_items().await.unwrap().is_empty());

    let created = items.create_item(&bolt("Bolt")).await.unwrap();
    assert_eq!(created, bolt("Bolt"));
    assert_eq!(items.list_items().await.unwrap(), vec![bolt("Bolt")]);

    let updated = items.update_item(&bolt("Hex bolt")).await.unwrap();
    assert_eq!(updated, bolt("Hex bolt"));
    assert_eq!(items.list_items().await.unwrap(), vec![bolt("Hex bolt")]);

    items.delete_item("1").await.unwrap();
    assert!(items.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn every_request_declares_json_content() {
    let stub = StubBackend::spawn().await;
    let items = stub.items_client();

    items.list_items().await.unwrap();
    items.create_item(&bolt("Bolt")).await.unwrap();
    items.update_item(&bolt("Bolt")).await.unwrap();
    items.delete_item("1").await.unwrap();

    let seen = stub.backend.content_types.lock().unwrap().clone();
    let endpoints: Vec<_> = seen.iter().map(|(e, _)| *e).collect();
    assert_eq!(endpoints, vec!["read", "create", "update", "delete"]);
    for (endpoint, content_type) in seen {
        assert_eq!(content_type.as_deref(), Some("application/json"), "{endpoint}");
    }
}

#[tokio::test]
async fn update_of_unknown_item_is_an_api_error() {
    let stub = StubBackend::spawn().await;

    let err = stub.items_client().update_item(&bolt("Ghost")).await.unwrap_err();

    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Item not found"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_of_unknown_item_is_an_api_error() {
    let stub = StubBackend::spawn().await;

    let err = stub.items_client().delete_item("404").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let stub = StubBackend::spawn().await;
    stub.backend.broken_reads.store(true, Ordering::SeqCst);

    let err = stub.items_client().list_items().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let items = RemoteItemClient::new(ApiClient::new(format!("http://{addr}/api")).unwrap());
    let err = items.list_items().await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn admin_login_unlocks_guard_until_logout() {
    let stub = StubBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let app = stub.app(dir.path());
    let guard = app.admin_guard(RecordingNavigator::new());

    let response = app.session.login("admin@x.com", "pw").await.unwrap();

    assert_eq!(response.message, "Login successful");
    assert!(app.session.is_admin());
    assert!(guard.can_activate());
    assert!(dir.path().join("currentUser.json").exists());

    app.session.logout().unwrap();

    assert!(!app.session.is_logged_in());
    assert!(!dir.path().join("currentUser.json").exists());
    assert!(!guard.can_activate());
    assert_eq!(guard.navigator().routes(), vec![LOGIN_ROUTE.to_string()]);
}

#[tokio::test]
async fn login_posts_credentials_as_json() {
    let stub = StubBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let app = stub.app(dir.path());

    app.session.login("user@x.com", "pw").await.unwrap();

    let bodies = stub.backend.login_bodies.lock().unwrap().clone();
    assert_eq!(bodies, vec![json!({ "email": "user@x.com", "password": "pw" })]);
    assert!(app.session.is_logged_in());
    assert!(!app.session.is_admin());
}

#[tokio::test]
async fn rejected_login_is_an_auth_error_and_keeps_session() {
    let stub = StubBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let app = stub.app(dir.path());
    app.session.login("admin@x.com", "pw").await.unwrap();

    let err = app.session.login("admin@x.com", "wrong").await.unwrap_err();

    assert_eq!(err, ClientError::auth(401, "Invalid credentials"));
    assert!(app.session.is_admin());
}

#[tokio::test]
async fn register_returns_the_response_without_logging_in() {
    // Registration is decoupled from login; a session needs a separate login.
    let stub = StubBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let app = stub.app(dir.path());
    let mut sub = app.session.subscribe();

    let response = app
        .session
        .register("Ada", "admin@x.com", "pw")
        .await
        .unwrap();

    assert_eq!(response.message, "User registered successfully");
    assert_eq!(response.user.map(|u| u.email), Some("admin@x.com".to_string()));
    assert!(!app.session.is_logged_in());
    assert!(!dir.path().join("currentUser.json").exists());
    assert_eq!(sub.drain(), vec![Session::Anonymous]);
}

#[tokio::test]
async fn session_survives_restart() {
    let stub = StubBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();

    {
        let app = stub.app(dir.path());
        app.session.login("admin@x.com", "pw").await.unwrap();
    }

    let restarted = stub.app(dir.path());

    assert!(restarted.session.is_admin());
    assert_eq!(
        restarted.session.current_user().map(|u| u.email),
        Some("admin@x.com".to_string())
    );
}

#[tokio::test]
async fn corrupt_session_file_starts_anonymous() {
    let stub = StubBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("currentUser.json"), "{ not json").unwrap();

    let app = stub.app(dir.path());

    assert_eq!(app.session.session(), Session::Anonymous);
    assert!(!app.admin_guard(RecordingNavigator::new()).can_activate());
}
