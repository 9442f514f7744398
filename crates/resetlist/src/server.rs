//! HTTP API for the checklist.
//!
//! The route surface is a plain JSON CRUD layer over the service; all
//! completion state and remaining-time values come from the reset-window
//! functions via [`TodoView`].

// axum handlers must be async fns taking extractors by value, even when
// they never await or consume them.
#![allow(clippy::unused_async, clippy::needless_pass_by_value)]

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::info;

use resetlist_app::service::{ServiceError, TodoService};
use resetlist_app::view::TodoView;
use resetlist_core::id::TodoId;
use resetlist_store_file::FileStore;

/// Name of the session cookie checked on `/api` requests.
const SESSION_COOKIE: &str = "session";

/// Actor recorded on HTTP-originated events when none is configured.
const DEFAULT_HTTP_ACTOR: &str = "web";

type SharedService = Arc<RwLock<TodoService<FileStore>>>;

#[derive(Clone)]
struct ServerState {
    service: SharedService,
    session_token: Option<String>,
    actor: String,
}

/// Serve the HTTP API on `addr` until interrupted.
pub fn run(addr: &str, service: TodoService<FileStore>) -> Result<()> {
    let auth = service.config().auth.clone();
    let state = ServerState {
        service: Arc::new(RwLock::new(service)),
        session_token: auth.session_token,
        actor: auth.user.unwrap_or_else(|| DEFAULT_HTTP_ACTOR.to_owned()),
    };
    let app = router(state);

    tokio::runtime::Runtime::new()?.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let local_addr = listener.local_addr()?;
        info!("listening on http://{local_addr}");
        axum::serve(listener, app).await?;
        Ok(())
    })
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/todos", get(list_todos).post(add_todo))
        .route("/api/todos/{id}/completed", post(set_completed))
        .route("/api/todos/{id}/name", post(rename_todo))
        .route("/api/todos/{id}", delete(remove_todo))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[derive(Deserialize)]
struct CreateTodoBody {
    text: String,
    reset_name: String,
}

#[derive(Deserialize)]
struct CompletedBody {
    completed: bool,
}

#[derive(Deserialize)]
struct RenameBody {
    text: String,
}

async fn list_todos(State(state): State<ServerState>, headers: HeaderMap) -> Response {
    if !session_is_valid(&headers, state.session_token.as_deref()) {
        return unauthorized();
    }
    let views: Vec<TodoView> = read(&state.service).list(OffsetDateTime::now_utc());
    Json(views).into_response()
}

async fn add_todo(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<CreateTodoBody>,
) -> Response {
    if !session_is_valid(&headers, state.session_token.as_deref()) {
        return unauthorized();
    }
    let result = write(&state.service).add(&body.text, &body.reset_name, &state.actor);
    match result {
        Ok(todo) => (StatusCode::CREATED, Json(todo)).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn set_completed(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<CompletedBody>,
) -> Response {
    if !session_is_valid(&headers, state.session_token.as_deref()) {
        return unauthorized();
    }
    let Some(id) = parse_id(&id) else {
        return invalid_id();
    };
    let result = write(&state.service).set_completed(id, body.completed, &state.actor);
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(&err),
    }
}

async fn rename_todo(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<RenameBody>,
) -> Response {
    if !session_is_valid(&headers, state.session_token.as_deref()) {
        return unauthorized();
    }
    let Some(id) = parse_id(&id) else {
        return invalid_id();
    };
    let result = write(&state.service).rename(id, &body.text, &state.actor);
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(&err),
    }
}

async fn remove_todo(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !session_is_valid(&headers, state.session_token.as_deref()) {
        return unauthorized();
    }
    let Some(id) = parse_id(&id) else {
        return invalid_id();
    };
    let result = write(&state.service).remove(id, &state.actor);
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(&err),
    }
}

/// Check the `session` cookie against the configured token.
///
/// No configured token means the check is disabled; a configured but empty
/// token never matches.
fn session_is_valid(headers: &HeaderMap, expected: Option<&str>) -> bool {
    let Some(expected) = expected else {
        return true;
    };
    if expected.is_empty() {
        return false;
    }
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|cookies| {
            cookies
                .split(';')
                .filter_map(|pair| pair.trim().split_once('='))
                .any(|(name, value)| name == SESSION_COOKIE && value == expected)
        })
}

fn parse_id(raw: &str) -> Option<TodoId> {
    raw.parse().ok()
}

fn read(service: &SharedService) -> RwLockReadGuard<'_, TodoService<FileStore>> {
    service.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(service: &SharedService) -> RwLockWriteGuard<'_, TodoService<FileStore>> {
    service.write().unwrap_or_else(PoisonError::into_inner)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({"error": "unauthorized"})),
    )
        .into_response()
}

fn invalid_id() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": "invalid todo id"})),
    )
        .into_response()
}

const fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::UnknownReset(_) | ServiceError::EmptyText => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &ServiceError) -> Response {
    (
        status_for(err),
        Json(serde_json::json!({"error": err.to_string()})),
    )
        .into_response()
}
