// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Read-only HTTP API over the persisted contributor collection
// role: query/http
// inputs: data directory holding contributors.json; HTTP requests
// outputs: greeting text, JSON array of records, single record or null
// side_effects: Reads the collection file on every request; binds a TCP listener in serve()
// invariants:
// - No caching; every request sees the file as it is on disk
// - Missing collection and unknown/empty handles are successes ([] / null), never errors
// errors: Unreadable or malformed collection → 500 with an error log
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::Value;

use crate::cli::ServeConfig;
use crate::store;

pub const GREETING: &str = "Hello! Welcome to iContribute!";

#[derive(Debug)]
pub struct ServeState {
  pub data_dir: PathBuf,
}

pub struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
  fn from(e: E) -> Self {
    Self(e.into())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    tracing::error!(error = %format!("{:#}", self.0), "failed to load contributors");
    (StatusCode::INTERNAL_SERVER_ERROR, "failed to load contributors").into_response()
  }
}

/// Case-insensitive exact match on `username`; empty handles never match.
pub fn find_by_username<'a>(list: &'a [Value], handle: &str) -> Option<&'a Value> {
  if handle.is_empty() {
    return None;
  }
  let wanted = handle.to_lowercase();

  list
    .iter()
    .find(|c| c.get("username").and_then(Value::as_str).unwrap_or("").to_lowercase() == wanted)
}

pub fn router(data_dir: PathBuf) -> Router {
  let state = Arc::new(ServeState { data_dir });

  Router::new()
    .route("/", get(handle_root))
    .route("/api/contributors", get(list_contributors))
    .route("/api/contributors/", get(empty_handle))
    .route("/api/contributors/:handle", get(get_contributor))
    .layer(Extension(state))
}

async fn handle_root() -> &'static str {
  GREETING
}

async fn list_contributors(Extension(state): Extension<Arc<ServeState>>) -> Result<Json<Vec<Value>>, ApiError> {
  let list = store::load_collection(&state.data_dir).await?;
  Ok(Json(list))
}

async fn empty_handle() -> Json<Value> {
  Json(Value::Null)
}

async fn get_contributor(
  Extension(state): Extension<Arc<ServeState>>,
  Path(handle): Path<String>,
) -> Result<Json<Value>, ApiError> {
  tracing::info!(handle = %handle, "fetching contributor");
  let list = store::load_collection(&state.data_dir).await?;
  let found = find_by_username(&list, &handle).cloned().unwrap_or(Value::Null);

  Ok(Json(found))
}

pub async fn serve(cfg: &ServeConfig) -> Result<()> {
  let app = router(PathBuf::from(&cfg.data_dir));
  let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port)).await?;

  tracing::info!(data_dir = %cfg.data_dir, "server is running at http://localhost:{}", cfg.port);

  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      tokio::signal::ctrl_c().await.ok();
      tracing::info!("received interrupt signal");
    })
    .await?;

  Ok(())
}
