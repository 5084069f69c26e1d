//! Shared test utilities for integration tests.
//!
//! [`TestClient`] starts an in-process mock of the tracker backend on an
//! ephemeral port and wires an [`AppState`] to it. The mock keeps its data in
//! memory and records every request so tests can assert on what was (or was
//! not) sent. Methods are intentionally broad to support various test
//! scenarios across different test files.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use fintrack::config::Config;
use fintrack::session::{MemoryTokenStore, TokenStore};
use fintrack::state::AppState;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const USERNAME: &str = "alice";
pub const EMAIL: &str = "alice@example.com";
pub const PASSWORD: &str = "correct horse";
pub const TOKEN: &str = "token-alice";

/// In-memory data behind the mock backend.
pub struct Backend {
    pub categories: Vec<Value>,
    pub transactions: Vec<Value>,
    pub tokens: Vec<String>,
    /// `"METHOD /path"` for every request received, in order.
    pub requests: Vec<String>,
    /// When set, category creation answers `success: false` with this message.
    pub reject_category_create: Option<String>,
    next_id: i64,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            transactions: Vec::new(),
            tokens: Vec::new(),
            requests: Vec::new(),
            reject_category_create: None,
            next_id: 100,
        }
    }
}

impl Backend {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| self.tokens.iter().any(|t| t == token))
            .unwrap_or(false)
    }

    fn category_type(&self, id: i64) -> Option<String> {
        self.categories
            .iter()
            .find(|c| c["id"] == id)
            .and_then(|c| c["type"].as_str())
            .map(str::to_string)
    }
}

type Shared = Arc<Mutex<Backend>>;

fn user_json() -> Value {
    json!({ "id": 1, "username": USERNAME, "email": EMAIL })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid or expired token" })),
    )
        .into_response()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{} not found", what) })),
    )
        .into_response()
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri().path());
    state.lock().unwrap().requests.push(line);
    next.run(request).await
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        state.lock().unwrap().tokens.push(TOKEN.to_string());
        Json(json!({ "payload": { "user": user_json(), "token": TOKEN } })).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid email or password" })),
        )
            .into_response()
    }
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Email already registered" })),
        )
            .into_response();
    }
    let username = body["username"].as_str().unwrap_or_default().to_string();
    let token = format!("token-{}", username);
    state.lock().unwrap().tokens.push(token.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "payload": {
                "user": { "id": "2", "username": username, "email": body["email"] },
                "token": token,
            }
        })),
    )
        .into_response()
}

async fn validate_token(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !state.lock().unwrap().authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "payload": { "user": user_json() } })).into_response()
}

async fn list_categories(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let backend = state.lock().unwrap();
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    let categories: Vec<Value> = backend
        .categories
        .iter()
        .filter(|c| match params.get("type") {
            Some(kind) => c["type"] == kind.as_str(),
            None => true,
        })
        .cloned()
        .collect();
    Json(json!({ "payload": categories })).into_response()
}

async fn get_category(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let backend = state.lock().unwrap();
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    match backend.categories.iter().find(|c| c["id"] == id) {
        Some(category) => Json(json!({ "payload": category })).into_response(),
        None => not_found("Category"),
    }
}

async fn create_category(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    if let Some(message) = backend.reject_category_create.clone() {
        return Json(json!({ "success": false, "message": message })).into_response();
    }
    let id = backend.next_id();
    let category = json!({
        "id": id,
        "name": body["name"],
        "type": body["type"],
        "user_id": 1,
        "created_at": "2024-01-01T00:00:00.000Z",
    });
    backend.categories.push(category.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Category created", "payload": category })),
    )
        .into_response()
}

async fn update_category(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    let Some(category) = backend.categories.iter_mut().find(|c| c["id"] == id) else {
        return not_found("Category");
    };
    for field in ["name", "type"] {
        if !body[field].is_null() {
            category[field] = body[field].clone();
        }
    }
    Json(json!({ "payload": category.clone() })).into_response()
}

async fn delete_category(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut backend = state.lock().unwrap();
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    let before = backend.categories.len();
    backend.categories.retain(|c| c["id"] != id);
    if backend.categories.len() == before {
        return not_found("Category");
    }
    Json(json!({ "success": true, "message": "Category deleted" })).into_response()
}

async fn list_transactions(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let backend = state.lock().unwrap();
    if !backend.authorized(&headers) {
        return unauthorized();
    }

    let date_of = |t: &Value| {
        let date = t["date"].as_str().unwrap_or_default();
        date.get(..10).unwrap_or(date).to_string()
    };
    let mut rows: Vec<Value> = backend
        .transactions
        .iter()
        .filter(|t| match params.get("start_date") {
            Some(start) => date_of(t) >= *start,
            None => true,
        })
        .filter(|t| match params.get("end_date") {
            Some(end) => date_of(t) <= *end,
            None => true,
        })
        .filter(|t| match params.get("category_id") {
            Some(id) => t["category_id"].to_string() == *id,
            None => true,
        })
        .filter(|t| match params.get("type") {
            Some(kind) => {
                let category_id = t["category_id"].as_i64().unwrap_or_default();
                backend.category_type(category_id).as_deref() == Some(kind.as_str())
            }
            None => true,
        })
        .cloned()
        .collect();

    let offset = params
        .get("offset")
        .and_then(|o| o.parse::<usize>().ok())
        .unwrap_or(0);
    rows = rows.into_iter().skip(offset).collect();
    if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
        rows.truncate(limit);
    }

    Json(json!({ "payload": rows })).into_response()
}

async fn get_transaction(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let backend = state.lock().unwrap();
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    match backend.transactions.iter().find(|t| t["id"] == id) {
        Some(transaction) => Json(json!({ "payload": transaction })).into_response(),
        None => not_found("Transaction"),
    }
}

async fn create_transaction(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    let id = backend.next_id();
    let transaction = json!({
        "id": id,
        "user_id": 1,
        "category_id": body["category_id"],
        // The real backend hands amounts back as decimal strings.
        "amount": format!("{:.2}", body["amount"].as_f64().unwrap_or_default()),
        "description": body["description"],
        "date": body["date"],
        "created_at": "2024-01-01T00:00:00.000Z",
    });
    backend.transactions.push(transaction.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "payload": transaction })),
    )
        .into_response()
}

async fn update_transaction(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    let Some(transaction) = backend.transactions.iter_mut().find(|t| t["id"] == id) else {
        return not_found("Transaction");
    };
    for field in ["category_id", "amount", "description", "date"] {
        if !body[field].is_null() {
            transaction[field] = body[field].clone();
        }
    }
    Json(json!({ "payload": transaction.clone() })).into_response()
}

async fn delete_transaction(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut backend = state.lock().unwrap();
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    let before = backend.transactions.len();
    backend.transactions.retain(|t| t["id"] != id);
    if backend.transactions.len() == before {
        return not_found("Transaction");
    }
    Json(json!({ "success": true, "message": "Transaction deleted" })).into_response()
}

fn router(state: Shared) -> Router {
    let api = Router::new()
        .route("/users/login", post(login))
        .route("/users/register", post(register))
        .route("/users/validate-token", get(validate_token))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/:id",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        );

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

/// A mock backend plus an [`AppState`] pointed at it.
pub struct TestClient {
    pub state: AppState,
    backend: Shared,
    base_url: String,
    _server: JoinHandle<()>,
}

impl TestClient {
    /// Start a fresh backend with an empty, signed-out session.
    pub async fn new() -> Self {
        Self::with_store(Box::new(MemoryTokenStore::default())).await
    }

    /// Start a fresh backend with the given token store.
    pub async fn with_store(store: Box<dyn TokenStore>) -> Self {
        let backend: Shared = Arc::new(Mutex::new(Backend::default()));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = router(backend.clone());
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend failed");
        });

        let base_url = format!("http://{}", addr);
        let config = Config::with_api_url(base_url.clone(), PathBuf::from("unused-session.json"));
        let state = AppState::new(config, store).expect("Failed to create app state");

        Self {
            state,
            backend,
            base_url,
            _server: server,
        }
    }

    /// Start a fresh backend and log the seeded user in.
    pub async fn signed_in() -> Self {
        let mut client = Self::new().await;
        client.login().await;
        client
    }

    pub async fn login(&mut self) {
        let state = &mut self.state;
        state
            .session
            .login(&state.client, EMAIL, PASSWORD)
            .await
            .expect("Login failed");
        self.clear_requests();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn backend(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap()
    }

    /// Make `token` acceptable to the backend without logging in.
    pub fn accept_token(&self, token: &str) {
        self.backend().tokens.push(token.to_string());
    }

    pub fn revoke_tokens(&self) {
        self.backend().tokens.clear();
    }

    pub fn seed_category(&self, id: i64, name: &str, kind: &str) {
        self.backend().categories.push(json!({
            "id": id,
            "name": name,
            "type": kind,
            "user_id": 1,
        }));
    }

    /// Seed a transaction. `amount` is stored as given, so strings and numbers
    /// can both be exercised.
    pub fn seed_transaction(
        &self,
        id: i64,
        category_id: i64,
        amount: Value,
        description: &str,
        date: &str,
    ) {
        self.backend().transactions.push(json!({
            "id": id,
            "user_id": 1,
            "category_id": category_id,
            "amount": amount,
            "description": description,
            "date": date,
        }));
    }

    pub fn requests(&self) -> Vec<String> {
        self.backend().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.backend().requests.clear();
    }
}
