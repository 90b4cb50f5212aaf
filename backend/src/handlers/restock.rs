//! HTTP handlers for restock request endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require, CurrentUser};
use crate::models::RestockRequest;
use crate::services::restock::{CreateRestockInput, RestockService};
use crate::AppState;
use shared::{Action, Resource};

/// List restock requests visible to the caller
pub async fn list_requests(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<RestockRequest>>> {
    require(&current_user.0, Action::Read, Resource::RestockRequest)?;
    let service = RestockService::new(state.db);
    let requests = service.list(&current_user.0).await?;
    Ok(Json(requests))
}

/// Get a restock request
pub async fn get_request(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(request_id): Path<Uuid>,
) -> AppResult<Json<RestockRequest>> {
    require(&current_user.0, Action::Read, Resource::RestockRequest)?;
    let service = RestockService::new(state.db);
    let request = service.get(&current_user.0, request_id).await?;
    Ok(Json(request))
}

/// File a restock request
pub async fn create_request(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateRestockInput>,
) -> AppResult<Json<RestockRequest>> {
    require(&current_user.0, Action::Create, Resource::RestockRequest)?;
    let service = RestockService::new(state.db);
    let request = service.create(current_user.0.user_id, input).await?;
    Ok(Json(request))
}

/// Approve a pending restock request
pub async fn approve_request(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(request_id): Path<Uuid>,
) -> AppResult<Json<RestockRequest>> {
    require(&current_user.0, Action::Approve, Resource::RestockRequest)?;
    let service = RestockService::new(state.db);
    let request = service.approve(request_id).await?;
    Ok(Json(request))
}

/// Reject a pending restock request
pub async fn reject_request(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(request_id): Path<Uuid>,
) -> AppResult<Json<RestockRequest>> {
    require(&current_user.0, Action::Approve, Resource::RestockRequest)?;
    let service = RestockService::new(state.db);
    let request = service.reject(request_id).await?;
    Ok(Json(request))
}
