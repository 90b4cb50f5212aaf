//! HTTP handlers for purchase order and line item endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require, CurrentUser};
use crate::models::Order;
use crate::services::order::{
    CreateOrderInput, OrderItemInput, OrderItemResponse, OrderService, OrderWithItems,
};
use crate::AppState;
use shared::{Action, Resource};

#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceItemsInput {
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Deserialize)]
pub struct ReceiveItemInput {
    pub quantity_received: i32,
}

/// List orders visible to the caller
pub async fn list_orders(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    require(&current_user.0, Action::Read, Resource::Order)?;
    let service = OrderService::new(state.db);
    let orders = service.list(&current_user.0).await?;
    Ok(Json(orders))
}

/// Get an order with its line items
pub async fn get_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<OrderWithItems>> {
    require(&current_user.0, Action::Read, Resource::Order)?;
    let service = OrderService::new(state.db);
    let order = service.get(&current_user.0, order_id).await?;
    Ok(Json(order))
}

/// Create an order, optionally with line items
pub async fn create_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<Json<OrderWithItems>> {
    require(&current_user.0, Action::Create, Resource::Order)?;
    let service = OrderService::new(state.db);
    let order = service.create(current_user.0.user_id, input).await?;
    Ok(Json(order))
}

/// Replace the line items of an order
pub async fn replace_order_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
    Json(input): Json<ReplaceItemsInput>,
) -> AppResult<Json<OrderWithItems>> {
    require(&current_user.0, Action::Update, Resource::Order)?;
    let service = OrderService::new(state.db);
    let order = service
        .replace_items(&current_user.0, order_id, input.items)
        .await?;
    Ok(Json(order))
}

/// Update the status of an order
pub async fn update_order_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
    Json(input): Json<UpdateStatusInput>,
) -> AppResult<Json<Order>> {
    require(&current_user.0, Action::Update, Resource::Order)?;
    let service = OrderService::new(state.db);
    let order = service
        .update_status(&current_user.0, order_id, &input.status)
        .await?;
    Ok(Json(order))
}

/// Delete an order
pub async fn delete_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require(&current_user.0, Action::Delete, Resource::Order)?;
    let service = OrderService::new(state.db);
    service.delete(&current_user.0, order_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Recompute and persist the order total
pub async fn calculate_order_total(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require(&current_user.0, Action::Update, Resource::Order)?;
    let service = OrderService::new(state.db);
    let total = service.calculate_total(order_id).await?;
    Ok(Json(serde_json::json!({ "total_amount": total })))
}

/// List all order items
pub async fn list_order_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<OrderItemResponse>>> {
    require(&current_user.0, Action::Read, Resource::OrderItem)?;
    let service = OrderService::new(state.db);
    let items = service.list_items().await?;
    Ok(Json(items))
}

/// Get an order item with its derived fields
pub async fn get_order_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<OrderItemResponse>> {
    require(&current_user.0, Action::Read, Resource::OrderItem)?;
    let service = OrderService::new(state.db);
    let item = service.get_item(item_id).await?;
    Ok(Json(item))
}

/// Record the received quantity on an order item
pub async fn receive_order_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
    Json(input): Json<ReceiveItemInput>,
) -> AppResult<Json<OrderItemResponse>> {
    require(&current_user.0, Action::Update, Resource::OrderItem)?;
    let service = OrderService::new(state.db);
    let item = service
        .receive_item(item_id, input.quantity_received)
        .await?;
    Ok(Json(item))
}
