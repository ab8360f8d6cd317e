//! In-process stand-in for the ReqRes API.
//!
//! Serves the fixture dataset under `/api` on an ephemeral local port with
//! the remote's header conventions, so the contract table can run offline
//! against the real HTTP client.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::{SecondsFormat, Utc};
use reqres_client::models::Page;
use reqres_client::ClientConfig;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{self, JSON_CONTENT_TYPE, MISSING_PASSWORD, PER_PAGE, TOKEN};

pub const MISSING_EMAIL: &str = "Missing email or username";
pub const UNDEFINED_USER: &str = "Note: Only defined users succeed registration";
pub const USER_NOT_FOUND: &str = "user not found";

/// Generated ids stay within three digits.
const ID_MODULUS: u64 = 999;

#[derive(Debug, Default)]
struct StubState {
    created: AtomicU64,
}

impl StubState {
    fn next_id(&self) -> String {
        let n = self.created.fetch_add(1, Ordering::Relaxed);
        (n % ID_MODULUS + 1).to_string()
    }
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<u64>,
}

fn json_response(status: StatusCode, body: &Value) -> Response {
    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        body.to_string(),
    )
        .into_response()
}

fn ok<T: Serialize>(body: T) -> Response {
    match serde_json::to_value(body) {
        Ok(value) => json_response(StatusCode::OK, &value),
        Err(e) => {
            json_response(StatusCode::INTERNAL_SERVER_ERROR, &json!({ "error": e.to_string() }))
        }
    }
}

fn not_found() -> Response {
    json_response(StatusCode::NOT_FOUND, &json!({}))
}

fn bad_request(message: &str) -> Response {
    json_response(StatusCode::BAD_REQUEST, &json!({ "error": message }))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Request body as a JSON object; anything else reads as `{}`.
fn object(body: &Bytes) -> Map<String, Value> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn support() -> Value {
    json!({
        "url": "https://reqres.in/#support-heading",
        "text": "To keep ReqRes free, contributions towards server costs are appreciated!"
    })
}

/// A page envelope followed by the `support` block the remote appends.
fn page_with_support<T: Serialize>(page: Page<T>) -> Response {
    match serde_json::to_value(page) {
        Ok(Value::Object(mut map)) => {
            map.insert("support".to_string(), support());
            json_response(StatusCode::OK, &Value::Object(map))
        }
        _ => json_response(StatusCode::INTERNAL_SERVER_ERROR, &json!({})),
    }
}

fn single_with_support<T: Serialize>(data: T) -> Response {
    ok(json!({ "data": data, "support": support() }))
}

// ── Users ──

async fn list_users(Query(query): Query<PageQuery>) -> Response {
    page_with_support(fixtures::paginate(&fixtures::all_users(), query.page.unwrap_or(1), PER_PAGE))
}

async fn get_user(Path(id): Path<u64>) -> Response {
    match fixtures::all_users().into_iter().find(|u| u.id == id) {
        Some(user) => single_with_support(user),
        None => not_found(),
    }
}

async fn create_user(State(state): State<Arc<StubState>>, body: Bytes) -> Response {
    let mut echoed = object(&body);
    echoed.insert("id".to_string(), Value::String(state.next_id()));
    echoed.insert("createdAt".to_string(), Value::String(timestamp()));
    json_response(StatusCode::CREATED, &Value::Object(echoed))
}

async fn update_user(Path(_id): Path<u64>, body: Bytes) -> Response {
    let mut echoed = object(&body);
    echoed.insert("updatedAt".to_string(), Value::String(timestamp()));
    json_response(StatusCode::OK, &Value::Object(echoed))
}

async fn delete_user(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

// ── Colors ──

async fn list_colors(Query(query): Query<PageQuery>) -> Response {
    let page = query.page.unwrap_or(1);
    page_with_support(fixtures::paginate(&fixtures::all_colors(), page, PER_PAGE))
}

async fn get_color(Path(id): Path<u64>) -> Response {
    match fixtures::all_colors().into_iter().find(|c| c.id == id) {
        Some(color) => single_with_support(color),
        None => not_found(),
    }
}

// ── Auth ──

struct Credentials {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingEmail,
    MissingPassword,
    UnknownUser,
}

impl Credentials {
    fn from_body(body: &Bytes) -> Self {
        let map = object(body);
        let field = |name: &str| {
            map.get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        Self {
            email: field("email"),
            password: field("password"),
        }
    }

    /// Id of the known user these credentials name.
    fn check(&self) -> Result<u64, Rejection> {
        let email = self.email.as_deref().ok_or(Rejection::MissingEmail)?;
        if self.password.is_none() {
            return Err(Rejection::MissingPassword);
        }
        fixtures::all_users()
            .into_iter()
            .find(|u| u.email == email)
            .map(|u| u.id)
            .ok_or(Rejection::UnknownUser)
    }
}

async fn register(body: Bytes) -> Response {
    match Credentials::from_body(&body).check() {
        Ok(id) => ok(json!({ "id": id, "token": TOKEN })),
        Err(Rejection::MissingEmail) => bad_request(MISSING_EMAIL),
        Err(Rejection::MissingPassword) => bad_request(MISSING_PASSWORD),
        Err(Rejection::UnknownUser) => bad_request(UNDEFINED_USER),
    }
}

async fn login(body: Bytes) -> Response {
    match Credentials::from_body(&body).check() {
        Ok(_) => ok(json!({ "token": TOKEN })),
        Err(Rejection::MissingEmail) => bad_request(MISSING_EMAIL),
        Err(Rejection::MissingPassword) => bad_request(MISSING_PASSWORD),
        Err(Rejection::UnknownUser) => bad_request(USER_NOT_FOUND),
    }
}

async fn fallback() -> Response {
    not_found()
}

/// The stub's routes, mounted under `/api`.
pub fn router() -> Router {
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).patch(update_user).delete(delete_user))
        .route("/colors", get(list_colors))
        .route("/colors/{id}", get(get_color))
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(Arc::new(StubState::default()));

    Router::new().nest("/api", api).fallback(fallback)
}

/// A running stub. The server stops when this is dropped.
#[derive(Debug)]
pub struct StubServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Bind `127.0.0.1:0` and serve [`router`] on a background task.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router()).await {
                tracing::warn!(error = %e, "ReqRes stub stopped");
            }
        });
        tracing::debug!(%addr, "ReqRes stub listening");
        Ok(Self { addr, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://{addr}/api`
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// A default client configuration pointed at this stub.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url())
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_stay_short() {
        let state = StubState::default();
        state.created.store(ID_MODULUS - 1, Ordering::Relaxed);
        assert_eq!(state.next_id(), "999");
        assert_eq!(state.next_id(), "1");
    }

    #[test]
    fn credentials_classification() {
        let check = |body: Value| Credentials::from_body(&Bytes::from(body.to_string())).check();
        assert_eq!(check(json!({ "email": "eve.holt@reqres.in", "password": "pistol" })), Ok(4));
        assert_eq!(check(json!({ "email": "peter@klaven" })), Err(Rejection::MissingPassword));
        assert_eq!(check(json!({ "email": "", "password": "x" })), Err(Rejection::MissingEmail));
        assert_eq!(
            check(json!({ "email": "nobody@x", "password": "x" })),
            Err(Rejection::UnknownUser)
        );
    }

    #[test]
    fn timestamps_have_millisecond_precision() {
        assert!(crate::matchers::Pattern::IsoTimestampMillis.is_match(&timestamp()));
    }
}
