use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::trip::{NewTrip, Trip};
use crate::AppState;

// ─── POST /trip ──────────────────────────────────────────────────

pub async fn create_trip(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewTrip>,
) -> Result<Json<Trip>, AppError> {
    let trip = state.store.insert(req).await?;
    Ok(Json(trip))
}

// ─── GET /trip ───────────────────────────────────────────────────

pub async fn list_trips(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Trip>>, AppError> {
    Ok(Json(state.store.list().await?))
}

// ─── GET /trip/:id ───────────────────────────────────────────────

pub async fn get_trip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Trip>, AppError> {
    state
        .store
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("trip '{id}' not found")))
}
