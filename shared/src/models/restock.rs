//! Restock request workflow model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Restock request status
///
/// The workflow is a three-state machine: `pending` may move to `approved`
/// or `rejected`, both of which are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestockStatus {
    Pending,
    Approved,
    Rejected,
}

impl RestockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestockStatus::Pending => "pending",
            RestockStatus::Approved => "approved",
            RestockStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RestockStatus::Pending),
            "approved" => Some(RestockStatus::Approved),
            "rejected" => Some(RestockStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RestockStatus::Pending)
    }

    pub fn can_transition_to(&self, to: RestockStatus) -> bool {
        matches!(
            (self, to),
            (RestockStatus::Pending, RestockStatus::Approved)
                | (RestockStatus::Pending, RestockStatus::Rejected)
        )
    }
}

/// An employee-initiated ask for more stock, subject to manager approval.
/// Approval has no automatic stock effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockRequest {
    pub id: Uuid,
    pub article_id: Uuid,
    pub quantity_requested: i32,
    pub comment: String,
    pub requester_id: Uuid,
    pub status: RestockStatus,
    pub created_at: DateTime<Utc>,
}
