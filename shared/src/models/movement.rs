//! Stock movement model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Types of stock movements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
    Transfer,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "in",
            MovementType::Out => "out",
            MovementType::Adjustment => "adjustment",
            MovementType::Transfer => "transfer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in" => Some(MovementType::In),
            "out" => Some(MovementType::Out),
            "adjustment" => Some(MovementType::Adjustment),
            "transfer" => Some(MovementType::Transfer),
            _ => None,
        }
    }

    /// Signed effect of this movement on the article quantity.
    ///
    /// Transfers are audit-only entries and leave the quantity untouched.
    pub fn stock_delta(&self, quantity: i32) -> i32 {
        match self {
            MovementType::In | MovementType::Adjustment => quantity,
            MovementType::Out => -quantity,
            MovementType::Transfer => 0,
        }
    }
}

/// An immutable record of a quantity change
///
/// A movement is a fact about stock; once created it is never updated or
/// deleted in normal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub article_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
    /// Delivery note, invoice number, etc.
    pub reference_document: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
