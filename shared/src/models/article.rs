//! Category and article models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A category grouping articles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// A stocked article
///
/// The `quantity` field is the authoritative stock level. It is only ever
/// mutated through stock movements or order receipts, never written directly
/// by API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub name: String,
    /// Opaque unique reference, generated at creation
    pub reference: Uuid,
    pub category: Option<Category>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub critical_threshold: i32,
    /// Derived: quantity at or below the critical threshold
    pub is_critical: bool,
    pub created_at: DateTime<Utc>,
}
