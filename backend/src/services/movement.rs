//! Movement recorder service
//!
//! Validates and appends stock movements, applying their ledger delta in
//! the same transaction as the movement insert: a movement is never
//! persisted without its matching stock change, and vice versa.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{MovementType, StockMovement};
use crate::services::article;
use shared::validation;

/// Movement service for recording and listing stock movements
#[derive(Clone)]
pub struct MovementService {
    db: PgPool,
}

/// Input for recording a stock movement
#[derive(Debug, Deserialize)]
pub struct RecordMovementInput {
    pub article_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub reference_document: Option<String>,
}

#[derive(Debug, FromRow)]
struct MovementRow {
    id: Uuid,
    article_id: Uuid,
    movement_type: String,
    quantity: i32,
    reference_document: String,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl MovementRow {
    fn into_movement(self) -> AppResult<StockMovement> {
        let movement_type = MovementType::parse(&self.movement_type).ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "unknown movement type in store: {}",
                self.movement_type
            ))
        })?;

        Ok(StockMovement {
            id: self.id,
            article_id: self.article_id,
            movement_type,
            quantity: self.quantity,
            reference_document: self.reference_document,
            user_id: self.user_id,
            created_at: self.created_at,
        })
    }
}

const MOVEMENT_SELECT: &str = r#"
    SELECT id, article_id, movement_type, quantity, reference_document, user_id, created_at
    FROM stock_movements
"#;

impl MovementService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a stock movement and apply its effect on the article quantity.
    ///
    /// Validation happens before any write; an `out` movement larger than
    /// the current stock rejects the whole call and leaves the quantity
    /// unchanged. Transfers are logged without touching the quantity.
    pub async fn record(
        &self,
        user_id: Uuid,
        input: RecordMovementInput,
    ) -> AppResult<StockMovement> {
        let delta = validation::movement_delta(input.movement_type, input.quantity)?;

        let mut tx = self.db.begin().await?;

        if delta != 0 {
            article::apply_stock_delta(&mut tx, input.article_id, delta).await?;
        } else {
            article::ensure_article_exists(&mut tx, input.article_id).await?;
        }

        let row = sqlx::query_as::<_, MovementRow>(
            r#"
            INSERT INTO stock_movements (article_id, movement_type, quantity, reference_document, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, article_id, movement_type, quantity, reference_document, user_id, created_at
            "#,
        )
            .bind(input.article_id)
            .bind(input.movement_type.as_str())
            .bind(input.quantity)
            .bind(input.reference_document.unwrap_or_default())
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        row.into_movement()
    }

    /// List all movements, most recent first
    pub async fn list(&self) -> AppResult<Vec<StockMovement>> {
        let sql = format!("{} ORDER BY created_at DESC", MOVEMENT_SELECT);
        let rows = sqlx::query_as::<_, MovementRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        rows.into_iter().map(MovementRow::into_movement).collect()
    }

    /// List movements for one article, most recent first
    pub async fn list_for_article(&self, article_id: Uuid) -> AppResult<Vec<StockMovement>> {
        let mut conn = self.db.acquire().await?;
        article::ensure_article_exists(&mut conn, article_id).await?;

        let sql = format!(
            "{} WHERE article_id = $1 ORDER BY created_at DESC",
            MOVEMENT_SELECT
        );
        let rows = sqlx::query_as::<_, MovementRow>(&sql)
            .bind(article_id)
            .fetch_all(&self.db)
            .await?;

        rows.into_iter().map(MovementRow::into_movement).collect()
    }
}
