//! HTTP handlers for category endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require, CurrentUser};
use crate::models::Category;
use crate::services::category::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
use crate::AppState;
use shared::{Action, Resource};

/// List all categories
pub async fn list_categories(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Category>>> {
    require(&current_user.0, Action::Read, Resource::Category)?;
    let service = CategoryService::new(state.db);
    let categories = service.list().await?;
    Ok(Json(categories))
}

/// Get a category
pub async fn get_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<Category>> {
    require(&current_user.0, Action::Read, Resource::Category)?;
    let service = CategoryService::new(state.db);
    let category = service.get(category_id).await?;
    Ok(Json(category))
}

/// Create a category
pub async fn create_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateCategoryInput>,
) -> AppResult<Json<Category>> {
    require(&current_user.0, Action::Create, Resource::Category)?;
    let service = CategoryService::new(state.db);
    let category = service.create(input).await?;
    Ok(Json(category))
}

/// Update a category
pub async fn update_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
    Json(input): Json<UpdateCategoryInput>,
) -> AppResult<Json<Category>> {
    require(&current_user.0, Action::Update, Resource::Category)?;
    let service = CategoryService::new(state.db);
    let category = service.update(category_id, input).await?;
    Ok(Json(category))
}

/// Delete a category
pub async fn delete_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require(&current_user.0, Action::Delete, Resource::Category)?;
    let service = CategoryService::new(state.db);
    service.delete(category_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
