use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
};
use tracing::{error, warn};

use doodle_types::api::CreateDoodleRequest;

use crate::AppState;
use crate::error::StoreError;
use crate::store::DoodleStore;

/// Run a blocking store call off the async runtime.
async fn blocking<F, T>(state: &AppState, f: F) -> Result<T, StoreError>
where
    F: FnOnce(&DoodleStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.store))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StoreError::Upstream(e.into())
        })?
}

/// GET /doodles/{day}
pub async fn list_by_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> Result<impl IntoResponse, StoreError> {
    let doodles = blocking(&state, move |store| store.list_by_day(&day)).await?;
    Ok(Json(doodles))
}

/// GET /doodles/{day}/{ts}
pub async fn get_one(
    State(state): State<AppState>,
    Path((day, ts)): Path<(String, String)>,
) -> Result<impl IntoResponse, StoreError> {
    let doodle = blocking(&state, move |store| store.get_one(&day, &ts)).await?;
    Ok(Json(doodle))
}

/// PUT /doodles
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateDoodleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, StoreError> {
    let Json(req) = body.map_err(|e| StoreError::InvalidPayload(e.body_text()))?;

    let doodle = blocking(&state, move |store| store.create(req.pixels)).await?;
    Ok(Json(doodle))
}

/// DELETE /doodles/{day}/{ts}
pub async fn remove(
    State(state): State<AppState>,
    Path((day, ts)): Path<(String, String)>,
) -> Result<impl IntoResponse, StoreError> {
    let message = blocking(&state, move |store| store.remove(&day, &ts)).await?;
    Ok(Json(message))
}

/// Any other verb/path pair.
pub async fn unsupported(method: Method, uri: Uri) -> impl IntoResponse {
    let message = format!("Unsupported route: \"{} {}\"", method, uri.path());
    warn!("{}", message);
    (StatusCode::BAD_REQUEST, Json(message))
}

pub async fn health() -> &'static str {
    "ok"
}
