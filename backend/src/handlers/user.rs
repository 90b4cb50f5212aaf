//! HTTP handlers for user and role administration endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require, CurrentUser};
use crate::models::User;
use crate::services::user::{CreateUserInput, UserService};
use crate::AppState;
use shared::{Action, Resource};

#[derive(Debug, Deserialize)]
pub struct AssignRolesInput {
    pub roles: Vec<String>,
}

/// List all user accounts
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    require(&current_user.0, Action::Read, Resource::User)?;
    let service = UserService::new(state.db);
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// The caller's own account
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db);
    let user = service.get_user(current_user.0.user_id).await?;
    Ok(Json(user))
}

/// Create a user account
pub async fn create_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateUserInput>,
) -> AppResult<Json<User>> {
    require(&current_user.0, Action::Create, Resource::User)?;
    let service = UserService::new(state.db);
    let user = service.create_user(input).await?;
    Ok(Json(user))
}

/// Replace a user's role set
pub async fn assign_roles(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<AssignRolesInput>,
) -> AppResult<Json<User>> {
    require(&current_user.0, Action::Update, Resource::User)?;
    let service = UserService::new(state.db);
    let user = service.assign_roles(user_id, input.roles).await?;
    Ok(Json(user))
}

/// Delete a user account
pub async fn delete_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require(&current_user.0, Action::Delete, Resource::User)?;
    let service = UserService::new(state.db);
    service.delete_user(user_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Users holding the supplier role, for order creation pickers
pub async fn list_suppliers(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    let service = UserService::new(state.db);
    let suppliers = service.list_suppliers().await?;
    Ok(Json(suppliers))
}

/// Role names known to the platform
pub async fn list_roles(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<String>>> {
    require(&current_user.0, Action::Read, Resource::User)?;
    let service = UserService::new(state.db);
    let roles = service.list_roles().await?;
    Ok(Json(roles))
}
