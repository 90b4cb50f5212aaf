//! HTTP handlers for article and stock endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require, CurrentUser};
use crate::models::{Article, ArticleSupplier, StockMovement};
use crate::services::article::{ArticleService, CreateArticleInput, UpdateArticleInput};
use crate::services::{MovementService, SupplierService};
use crate::AppState;
use shared::{Action, Resource};

/// List all articles
pub async fn list_articles(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Article>>> {
    require(&current_user.0, Action::Read, Resource::Article)?;
    let service = ArticleService::new(state.db);
    let articles = service.list().await?;
    Ok(Json(articles))
}

/// List articles at or below their critical threshold
pub async fn list_critical_articles(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Article>>> {
    require(&current_user.0, Action::Read, Resource::Article)?;
    let service = ArticleService::new(state.db);
    let articles = service.list_critical().await?;
    Ok(Json(articles))
}

/// Get an article
pub async fn get_article(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(article_id): Path<Uuid>,
) -> AppResult<Json<Article>> {
    require(&current_user.0, Action::Read, Resource::Article)?;
    let service = ArticleService::new(state.db);
    let article = service.get(article_id).await?;
    Ok(Json(article))
}

/// Create an article
pub async fn create_article(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateArticleInput>,
) -> AppResult<Json<Article>> {
    require(&current_user.0, Action::Create, Resource::Article)?;
    let service = ArticleService::new(state.db);
    let article = service.create(input).await?;
    Ok(Json(article))
}

/// Update an article's descriptive fields
pub async fn update_article(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(article_id): Path<Uuid>,
    Json(input): Json<UpdateArticleInput>,
) -> AppResult<Json<Article>> {
    require(&current_user.0, Action::Update, Resource::Article)?;
    let service = ArticleService::new(state.db);
    let article = service.update(article_id, input).await?;
    Ok(Json(article))
}

/// Delete an article
pub async fn delete_article(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(article_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require(&current_user.0, Action::Delete, Resource::Article)?;
    let service = ArticleService::new(state.db);
    service.delete(article_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Movement history for an article
pub async fn get_article_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(article_id): Path<Uuid>,
) -> AppResult<Json<Vec<StockMovement>>> {
    require(&current_user.0, Action::Read, Resource::StockMovement)?;
    let service = MovementService::new(state.db);
    let movements = service.list_for_article(article_id).await?;
    Ok(Json(movements))
}

/// Supplier associations for an article
pub async fn get_article_suppliers(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(article_id): Path<Uuid>,
) -> AppResult<Json<Vec<ArticleSupplier>>> {
    require(&current_user.0, Action::Read, Resource::ArticleSupplier)?;
    let service = SupplierService::new(state.db);
    let suppliers = service.list_for_article(article_id).await?;
    Ok(Json(suppliers))
}
