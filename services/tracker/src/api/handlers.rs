//! Tracker 处理器

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{debug, info};

use super::AppState;
use super::dto::{CreateTrackerRequest, UpdateTrackerRequest};
use super::error::{ApiError, Operation};
use super::validation::{parse_id, validate_create, validate_update};
use crate::domain::Tracker;

fn path_id(raw: &str) -> Result<i64, ApiError> {
    parse_id(raw).map_err(ApiError::invalid_id)
}

/// GET /trackers
pub async fn list_trackers(State(state): State<AppState>) -> Result<Json<Vec<Tracker>>, ApiError> {
    let ctx = state.request_context();
    let trackers = state
        .service
        .list_trackers(&ctx)
        .await
        .map_err(|e| ApiError::from_app(Operation::List, None, e))?;

    info!(count = trackers.len(), "Retrieved trackers");
    Ok(Json(trackers))
}

/// POST /trackers
pub async fn create_tracker(
    State(state): State<AppState>,
    payload: Result<Json<CreateTrackerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Tracker>), ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::invalid_json("CreateTrackerRequest", &rejection))?;
    let new = validate_create(request).map_err(|v| ApiError::validation(&v))?;

    let ctx = state.request_context();
    let tracker = state
        .service
        .create_tracker(&ctx, new)
        .await
        .map_err(|e| ApiError::from_app(Operation::Create, None, e))?;

    info!(id = tracker.id, "Created tracker");
    Ok((StatusCode::CREATED, Json(tracker)))
}

/// GET /trackers/{id}
pub async fn get_tracker(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Tracker>, ApiError> {
    let id = path_id(&raw_id)?;
    debug!(id, "Fetching tracker");

    let ctx = state.request_context();
    let tracker = state
        .service
        .get_tracker(&ctx, id)
        .await
        .map_err(|e| ApiError::from_app(Operation::Get, Some(id), e))?;

    Ok(Json(tracker))
}

/// PUT /trackers/{id}
pub async fn update_tracker(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTrackerRequest>, JsonRejection>,
) -> Result<Json<Tracker>, ApiError> {
    let id = path_id(&raw_id)?;
    let Json(request) =
        payload.map_err(|rejection| ApiError::invalid_json("UpdateTrackerRequest", &rejection))?;
    let patch = validate_update(request).map_err(|v| ApiError::validation(&v))?;

    let ctx = state.request_context();
    let tracker = state
        .service
        .update_tracker(&ctx, id, patch)
        .await
        .map_err(|e| ApiError::from_app(Operation::Update, Some(id), e))?;

    info!(id, "Updated tracker");
    Ok(Json(tracker))
}

/// DELETE /trackers/{id}
pub async fn delete_tracker(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&raw_id)?;

    let ctx = state.request_context();
    state
        .service
        .delete_tracker(&ctx, id)
        .await
        .map_err(|e| ApiError::from_app(Operation::Delete, Some(id), e))?;

    info!(id, "Deleted tracker");
    Ok(StatusCode::NO_CONTENT)
}
