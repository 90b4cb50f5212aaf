//! Purchase order and line item models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Purchase order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

/// A supplier purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub supplier_id: Uuid,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub actual_delivery_date: Option<NaiveDate>,
    /// Derived: recomputed from the line items, never accumulated
    pub total_amount: Decimal,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item on a purchase order, unique per order and article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub article_id: Uuid,
    pub quantity_ordered: i32,
    pub quantity_received: i32,
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn total_price(&self) -> Decimal {
        Decimal::from(self.quantity_ordered) * self.unit_price
    }

    pub fn is_fully_received(&self) -> bool {
        self.quantity_received >= self.quantity_ordered
    }

    pub fn remaining_quantity(&self) -> i32 {
        (self.quantity_ordered - self.quantity_received).max(0)
    }
}

/// Order total, recomputed from scratch over the current line items
pub fn order_total<'a>(items: impl IntoIterator<Item = &'a OrderItem>) -> Decimal {
    items.into_iter().map(OrderItem::total_price).sum()
}
