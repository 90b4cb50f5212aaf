//! Purchase order service
//!
//! Order and line item CRUD, derived total computation, and the order
//! receipt processor that feeds received goods into the article ledger.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{Order, OrderItem, OrderStatus};
use crate::services::article;
use shared::validation;

/// Order service for purchase order management
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// Input for creating an order, optionally with its line items
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub order_number: String,
    pub supplier_id: Uuid,
    pub expected_delivery_date: Option<NaiveDate>,
    pub items: Option<Vec<OrderItemInput>>,
}

/// A line item in a create/replace request
#[derive(Debug, Deserialize)]
pub struct OrderItemInput {
    pub article_id: Uuid,
    pub quantity_ordered: i32,
    pub unit_price: Decimal,
}

/// Line item with its derived values, as returned by the API
#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub article_id: Uuid,
    pub article_name: String,
    pub quantity_ordered: i32,
    pub quantity_received: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub is_fully_received: bool,
    pub remaining_quantity: i32,
}

/// An order together with its line items
#[derive(Debug, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: String,
    supplier_id: Uuid,
    status: String,
    order_date: DateTime<Utc>,
    expected_delivery_date: Option<NaiveDate>,
    actual_delivery_date: Option<NaiveDate>,
    total_amount: Decimal,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> AppResult<Order> {
        let status = OrderStatus::parse(&self.status).ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("unknown order status in store: {}", self.status))
        })?;

        Ok(Order {
            id: self.id,
            order_number: self.order_number,
            supplier_id: self.supplier_id,
            status,
            order_date: self.order_date,
            expected_delivery_date: self.expected_delivery_date,
            actual_delivery_date: self.actual_delivery_date,
            total_amount: self.total_amount,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    article_id: Uuid,
    article_name: String,
    quantity_ordered: i32,
    quantity_received: i32,
    unit_price: Decimal,
}

impl OrderItemRow {
    fn into_response(self) -> OrderItemResponse {
        let item = OrderItem {
            id: self.id,
            order_id: self.order_id,
            article_id: self.article_id,
            quantity_ordered: self.quantity_ordered,
            quantity_received: self.quantity_received,
            unit_price: self.unit_price,
        };

        OrderItemResponse {
            total_price: item.total_price(),
            is_fully_received: item.is_fully_received(),
            remaining_quantity: item.remaining_quantity(),
            id: item.id,
            order_id: item.order_id,
            article_id: item.article_id,
            article_name: self.article_name,
            quantity_ordered: item.quantity_ordered,
            quantity_received: item.quantity_received,
            unit_price: item.unit_price,
        }
    }
}

const ORDER_SELECT: &str = r#"
    SELECT id, order_number, supplier_id, status, order_date, expected_delivery_date,
           actual_delivery_date, total_amount, created_by, created_at, updated_at
    FROM orders
"#;

const ITEM_SELECT: &str = r#"
    SELECT oi.id, oi.order_id, oi.article_id, a.name AS article_name,
           oi.quantity_ordered, oi.quantity_received, oi.unit_price
    FROM order_items oi
    JOIN articles a ON a.id = oi.article_id
"#;

/// Recompute and persist the order total from its current line items.
/// A pure recomputation, never an accumulation.
async fn recompute_total(conn: &mut PgConnection, order_id: Uuid) -> AppResult<Decimal> {
    sqlx::query_scalar::<_, Decimal>(
        r#"
        UPDATE orders
        SET total_amount = COALESCE(
                (SELECT SUM(quantity_ordered * unit_price) FROM order_items WHERE order_id = $1),
                0),
            updated_at = NOW()
        WHERE id = $1
        RETURNING total_amount
        "#,
    )
    .bind(order_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| AppError::NotFound("Order".to_string()))
}

fn validate_item_inputs(items: &[OrderItemInput]) -> AppResult<()> {
    for item in items {
        if item.quantity_ordered < 1 {
            return Err(AppError::InvalidQuantity(
                "ordered quantity must be at least 1".to_string(),
            ));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_price".to_string(),
                message: "Unit price cannot be negative".to_string(),
                message_fr: "Le prix unitaire ne peut être négatif".to_string(),
            });
        }
    }

    let mut seen = std::collections::HashSet::new();
    for item in items {
        if !seen.insert(item.article_id) {
            return Err(AppError::DuplicateEntry("order item article".to_string()));
        }
    }

    Ok(())
}

impl OrderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List orders; suppliers only see the orders addressed to them
    pub async fn list(&self, viewer: &AuthUser) -> AppResult<Vec<Order>> {
        let rows = if viewer.is_supplier() {
            let sql = format!("{} WHERE supplier_id = $1 ORDER BY created_at DESC", ORDER_SELECT);
            sqlx::query_as::<_, OrderRow>(&sql)
                .bind(viewer.user_id)
                .fetch_all(&self.db)
                .await?
        } else {
            let sql = format!("{} ORDER BY created_at DESC", ORDER_SELECT);
            sqlx::query_as::<_, OrderRow>(&sql).fetch_all(&self.db).await?
        };

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    pub async fn get(&self, viewer: &AuthUser, order_id: Uuid) -> AppResult<OrderWithItems> {
        let order = self.load_order(order_id).await?;

        // Suppliers cannot see other suppliers' orders; respond as if absent
        if viewer.is_supplier() && order.supplier_id != viewer.user_id {
            return Err(AppError::NotFound("Order".to_string()));
        }

        let items = self.load_items(order_id).await?;
        Ok(OrderWithItems { order, items })
    }

    pub async fn create(&self, creator_id: Uuid, input: CreateOrderInput) -> AppResult<OrderWithItems> {
        let supplier_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(input.supplier_id)
                .fetch_one(&self.db)
                .await?;
        if !supplier_exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        let duplicate = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE order_number = $1",
        )
        .bind(&input.order_number)
        .fetch_one(&self.db)
        .await?;
        if duplicate > 0 {
            return Err(AppError::DuplicateEntry("order number".to_string()));
        }

        let items = input.items.unwrap_or_default();
        validate_item_inputs(&items)?;

        let mut tx = self.db.begin().await?;

        let order_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO orders (order_number, supplier_id, expected_delivery_date, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&input.order_number)
        .bind(input.supplier_id)
        .bind(input.expected_delivery_date)
        .bind(creator_id)
        .fetch_one(&mut *tx)
        .await?;

        for item in &items {
            article::ensure_article_exists(&mut tx, item.article_id).await?;
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, article_id, quantity_ordered, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id)
            .bind(item.article_id)
            .bind(item.quantity_ordered)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        recompute_total(&mut tx, order_id).await?;
        tx.commit().await?;

        let order = self.load_order(order_id).await?;
        let items = self.load_items(order_id).await?;
        Ok(OrderWithItems { order, items })
    }

    /// Replace the line items of an order and recompute its total.
    ///
    /// Receipt progress on replaced items is discarded without stock
    /// compensation, matching the behavior of plain item deletion.
    pub async fn replace_items(
        &self,
        viewer: &AuthUser,
        order_id: Uuid,
        items: Vec<OrderItemInput>,
    ) -> AppResult<OrderWithItems> {
        let order = self.load_order(order_id).await?;
        if viewer.is_supplier() && order.supplier_id != viewer.user_id {
            return Err(AppError::NotFound("Order".to_string()));
        }

        validate_item_inputs(&items)?;

        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        for item in &items {
            article::ensure_article_exists(&mut tx, item.article_id).await?;
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, article_id, quantity_ordered, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id)
            .bind(item.article_id)
            .bind(item.quantity_ordered)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        recompute_total(&mut tx, order_id).await?;
        tx.commit().await?;

        let order = self.load_order(order_id).await?;
        let items = self.load_items(order_id).await?;
        Ok(OrderWithItems { order, items })
    }

    /// Update the order status; a supplier may only touch their own orders
    pub async fn update_status(
        &self,
        viewer: &AuthUser,
        order_id: Uuid,
        status: &str,
    ) -> AppResult<Order> {
        let new_status = OrderStatus::parse(status).ok_or_else(|| AppError::Validation {
            field: "status".to_string(),
            message: format!("Invalid status: {}", status),
            message_fr: format!("Statut non valide: {}", status),
        })?;

        let order = self.load_order(order_id).await?;
        if viewer.is_supplier() && order.supplier_id != viewer.user_id {
            return Err(AppError::Forbidden(
                "suppliers may only update their own orders".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, order_number, supplier_id, status, order_date, expected_delivery_date,
                      actual_delivery_date, total_amount, created_by, created_at, updated_at
            "#,
        )
        .bind(new_status.as_str())
        .bind(order_id)
        .fetch_one(&self.db)
        .await?;

        row.into_order()
    }

    pub async fn delete(&self, viewer: &AuthUser, order_id: Uuid) -> AppResult<()> {
        let order = self.load_order(order_id).await?;
        if viewer.is_supplier() && order.supplier_id != viewer.user_id {
            return Err(AppError::NotFound("Order".to_string()));
        }

        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Recompute and persist the order total on demand
    pub async fn calculate_total(&self, order_id: Uuid) -> AppResult<Decimal> {
        let mut conn = self.db.acquire().await?;
        recompute_total(&mut conn, order_id).await
    }

    /// List all order items
    pub async fn list_items(&self) -> AppResult<Vec<OrderItemResponse>> {
        let sql = format!("{} ORDER BY oi.order_id", ITEM_SELECT);
        let rows = sqlx::query_as::<_, OrderItemRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(OrderItemRow::into_response).collect())
    }

    pub async fn get_item(&self, item_id: Uuid) -> AppResult<OrderItemResponse> {
        let sql = format!("{} WHERE oi.id = $1", ITEM_SELECT);
        let row = sqlx::query_as::<_, OrderItemRow>(&sql)
            .bind(item_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Order item".to_string()))?;

        Ok(row.into_response())
    }

    /// Record the received quantity on a line item and feed the difference
    /// into the article ledger.
    ///
    /// The stock increment is the delta against the previously received
    /// figure, so calling this twice with the same value never
    /// double-counts. The item row is locked for the duration of the
    /// transaction; the item update and the ledger adjustment commit
    /// together or not at all.
    pub async fn receive_item(
        &self,
        item_id: Uuid,
        quantity_received: i32,
    ) -> AppResult<OrderItemResponse> {
        if quantity_received < 0 {
            return Err(AppError::InvalidQuantity(
                "received quantity cannot be negative".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let (article_id, quantity_ordered, previously_received) =
            sqlx::query_as::<_, (Uuid, i32, i32)>(
                r#"
                SELECT article_id, quantity_ordered, quantity_received
                FROM order_items
                WHERE id = $1
                FOR UPDATE
                "#,
            )
            .bind(item_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Order item".to_string()))?;

        let delta =
            validation::receipt_delta(quantity_ordered, previously_received, quantity_received)?;

        if delta != 0 {
            article::apply_stock_delta(&mut tx, article_id, delta).await?;
        }

        sqlx::query("UPDATE order_items SET quantity_received = $1 WHERE id = $2")
            .bind(quantity_received)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_item(item_id).await
    }

    async fn load_order(&self, order_id: Uuid) -> AppResult<Order> {
        let sql = format!("{} WHERE id = $1", ORDER_SELECT);
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(order_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        row.into_order()
    }

    async fn load_items(&self, order_id: Uuid) -> AppResult<Vec<OrderItemResponse>> {
        let sql = format!("{} WHERE oi.order_id = $1 ORDER BY a.name", ITEM_SELECT);
        let rows = sqlx::query_as::<_, OrderItemRow>(&sql)
            .bind(order_id)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(OrderItemRow::into_response).collect())
    }
}
