//! HTTP handlers for article-supplier association endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require, CurrentUser};
use crate::models::ArticleSupplier;
use crate::services::supplier::{
    CreateAssociationInput, SupplierService, UpdateAssociationInput,
};
use crate::AppState;
use shared::{Action, Resource};

/// List all article-supplier associations
pub async fn list_associations(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<ArticleSupplier>>> {
    require(&current_user.0, Action::Read, Resource::ArticleSupplier)?;
    let service = SupplierService::new(state.db);
    let associations = service.list().await?;
    Ok(Json(associations))
}

/// Get an association
pub async fn get_association(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(association_id): Path<Uuid>,
) -> AppResult<Json<ArticleSupplier>> {
    require(&current_user.0, Action::Read, Resource::ArticleSupplier)?;
    let service = SupplierService::new(state.db);
    let association = service.get(association_id).await?;
    Ok(Json(association))
}

/// Associate a supplier with an article
pub async fn create_association(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateAssociationInput>,
) -> AppResult<Json<ArticleSupplier>> {
    require(&current_user.0, Action::Create, Resource::ArticleSupplier)?;
    let service = SupplierService::new(state.db);
    let association = service.create(input).await?;
    Ok(Json(association))
}

/// Update an association's reference or price
pub async fn update_association(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(association_id): Path<Uuid>,
    Json(input): Json<UpdateAssociationInput>,
) -> AppResult<Json<ArticleSupplier>> {
    require(&current_user.0, Action::Update, Resource::ArticleSupplier)?;
    let service = SupplierService::new(state.db);
    let association = service.update(association_id, input).await?;
    Ok(Json(association))
}

/// Delete an association
pub async fn delete_association(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(association_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require(&current_user.0, Action::Delete, Resource::ArticleSupplier)?;
    let service = SupplierService::new(state.db);
    service.delete(association_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Mark an association as the preferred source for its article
pub async fn set_preferred(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(association_id): Path<Uuid>,
) -> AppResult<Json<ArticleSupplier>> {
    require(&current_user.0, Action::Update, Resource::ArticleSupplier)?;
    let service = SupplierService::new(state.db);
    let association = service.set_preferred(association_id).await?;
    Ok(Json(association))
}

/// Articles sourced from one supplier
pub async fn get_supplier_articles(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Vec<ArticleSupplier>>> {
    require(&current_user.0, Action::Read, Resource::ArticleSupplier)?;
    let service = SupplierService::new(state.db);
    let associations = service.list_for_supplier(supplier_id).await?;
    Ok(Json(associations))
}
