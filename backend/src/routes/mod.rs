//! Route definitions for the Inventory & Procurement Management Platform

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - category management
        .nest("/categories", category_routes())
        // Protected routes - article catalogue and stock
        .nest("/articles", article_routes())
        // Protected routes - stock movements
        .nest("/movements", movement_routes())
        // Protected routes - purchase orders
        .nest("/orders", order_routes())
        // Protected routes - order line items
        .nest("/order-items", order_item_routes())
        // Protected routes - article sourcing
        .nest("/article-suppliers", article_supplier_routes())
        .nest("/suppliers", supplier_routes())
        // Protected routes - restock workflow
        .nest("/restock-requests", restock_routes())
        // Protected routes - user administration
        .nest("/users", user_routes())
        .nest("/roles", role_routes())
}

/// Category management routes (protected)
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_categories).post(handlers::create_category))
        .route(
            "/:category_id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Article management routes (protected)
fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_articles).post(handlers::create_article))
        .route("/critical", get(handlers::list_critical_articles))
        .route(
            "/:article_id",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .route("/:article_id/movements", get(handlers::get_article_movements))
        .route("/:article_id/suppliers", get(handlers::get_article_suppliers))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock movement routes (protected)
fn movement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_movements).post(handlers::record_movement))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Purchase order routes (protected)
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route(
            "/:order_id",
            get(handlers::get_order).delete(handlers::delete_order),
        )
        .route("/:order_id/status", patch(handlers::update_order_status))
        .route("/:order_id/items", put(handlers::replace_order_items))
        .route("/:order_id/total", post(handlers::calculate_order_total))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Order line item routes (protected)
fn order_item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_order_items))
        .route("/:item_id", get(handlers::get_order_item))
        .route(
            "/:item_id/received-quantity",
            patch(handlers::receive_order_item),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Article-supplier association routes (protected)
fn article_supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_associations).post(handlers::create_association))
        .route(
            "/:association_id",
            get(handlers::get_association)
                .put(handlers::update_association)
                .delete(handlers::delete_association),
        )
        .route("/:association_id/set-preferred", patch(handlers::set_preferred))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier directory routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers))
        .route("/:supplier_id/articles", get(handlers::get_supplier_articles))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Restock workflow routes (protected)
fn restock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_requests).post(handlers::create_request))
        .route("/:request_id", get(handlers::get_request))
        .route("/:request_id/approve", post(handlers::approve_request))
        .route("/:request_id/reject", post(handlers::reject_request))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// User administration routes (protected)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route("/me", get(handlers::me))
        .route("/:user_id", axum::routing::delete(handlers::delete_user))
        .route("/:user_id/roles", put(handlers::assign_roles))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Role listing routes (protected)
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_roles))
        .route_layer(middleware::from_fn(auth_middleware))
}
