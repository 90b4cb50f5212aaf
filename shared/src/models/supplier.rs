//! Article-supplier association model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Association between an article and a supplier, unique per pair.
///
/// At most one association per article carries `is_preferred = true`;
/// the backend enforces this with a reset-then-set inside one transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSupplier {
    pub id: Uuid,
    pub article_id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_reference: String,
    pub supplier_price: Decimal,
    pub is_preferred: bool,
    pub created_at: DateTime<Utc>,
}
