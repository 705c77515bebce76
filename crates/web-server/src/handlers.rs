use crate::{error::AppError, AppState};
use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use core_types::{NewRace, Race};
use serde_json::{json, Value};
use std::sync::Arc;

/// # GET /
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Race API is running" }))
}

/// # OPTIONS /api/races
/// CORS preflight. The headers come from the router-wide layers.
pub async fn races_options() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// # POST /api/races
/// The body is parsed as JSON whatever its `Content-Type`.
pub async fn create_race(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let payload: Value = serde_json::from_slice(&body)?;
    tracing::debug!(%payload, "POST /api/races payload");

    let race = NewRace::from_json(&payload)?;
    let id = state.db_repo.insert_race(&race).await?;
    tracing::info!(id, event_name = %race.event_name, "Race inserted.");

    Ok((StatusCode::CREATED, Json(json!({ "status": "ok" }))))
}

/// # GET /api/races
/// Every race, oldest first. No pagination.
pub async fn list_races(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Race>>, AppError> {
    let races = state.db_repo.list_races().await?;
    tracing::debug!(count = races.len(), "GET /api/races");
    Ok(Json(races))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
