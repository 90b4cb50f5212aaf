//! Restock request workflow service
//!
//! Requests start pending and end approved or rejected. Decisions are
//! terminal; a decided request rejects any further transition. Approval
//! has no automatic stock effect, the goods arrive later through an
//! order receipt or an `in` movement.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{RestockRequest, RestockStatus};
use crate::services::article;

/// Restock service for the request/decision workflow
#[derive(Clone)]
pub struct RestockService {
    db: PgPool,
}

/// Input for filing a restock request
#[derive(Debug, Deserialize)]
pub struct CreateRestockInput {
    pub article_id: Uuid,
    pub quantity_requested: i32,
    pub comment: Option<String>,
}

#[derive(Debug, FromRow)]
struct RestockRow {
    id: Uuid,
    article_id: Uuid,
    quantity_requested: i32,
    comment: String,
    requester_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

impl RestockRow {
    fn into_request(self) -> AppResult<RestockRequest> {
        let status = RestockStatus::parse(&self.status).ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "unknown restock status in store: {}",
                self.status
            ))
        })?;

        Ok(RestockRequest {
            id: self.id,
            article_id: self.article_id,
            quantity_requested: self.quantity_requested,
            comment: self.comment,
            requester_id: self.requester_id,
            status,
            created_at: self.created_at,
        })
    }
}

const RESTOCK_SELECT: &str = r#"
    SELECT id, article_id, quantity_requested, comment, requester_id, status, created_at
    FROM restock_requests
"#;

impl RestockService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        requester_id: Uuid,
        input: CreateRestockInput,
    ) -> AppResult<RestockRequest> {
        if input.quantity_requested < 1 {
            return Err(AppError::InvalidQuantity(
                "requested quantity must be at least 1".to_string(),
            ));
        }

        let mut conn = self.db.acquire().await?;
        article::ensure_article_exists(&mut conn, input.article_id).await?;

        let row = sqlx::query_as::<_, RestockRow>(
            r#"
            INSERT INTO restock_requests (article_id, quantity_requested, comment, requester_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, article_id, quantity_requested, comment, requester_id, status, created_at
            "#,
        )
        .bind(input.article_id)
        .bind(input.quantity_requested)
        .bind(input.comment.unwrap_or_default())
        .bind(requester_id)
        .bind(RestockStatus::Pending.as_str())
        .fetch_one(&self.db)
        .await?;

        row.into_request()
    }

    /// List requests; non-managers only see their own
    pub async fn list(&self, viewer: &AuthUser) -> AppResult<Vec<RestockRequest>> {
        let rows = if viewer.is_manager() {
            let sql = format!("{} ORDER BY created_at DESC", RESTOCK_SELECT);
            sqlx::query_as::<_, RestockRow>(&sql).fetch_all(&self.db).await?
        } else {
            let sql = format!(
                "{} WHERE requester_id = $1 ORDER BY created_at DESC",
                RESTOCK_SELECT
            );
            sqlx::query_as::<_, RestockRow>(&sql)
                .bind(viewer.user_id)
                .fetch_all(&self.db)
                .await?
        };

        rows.into_iter().map(RestockRow::into_request).collect()
    }

    pub async fn get(&self, viewer: &AuthUser, request_id: Uuid) -> AppResult<RestockRequest> {
        let sql = format!("{} WHERE id = $1", RESTOCK_SELECT);
        let row = sqlx::query_as::<_, RestockRow>(&sql)
            .bind(request_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Restock request".to_string()))?;

        let request = row.into_request()?;

        // Non-managers cannot see others' requests; respond as if absent
        if !viewer.is_manager() && request.requester_id != viewer.user_id {
            return Err(AppError::NotFound("Restock request".to_string()));
        }

        Ok(request)
    }

    pub async fn approve(&self, request_id: Uuid) -> AppResult<RestockRequest> {
        self.decide(request_id, RestockStatus::Approved).await
    }

    pub async fn reject(&self, request_id: Uuid) -> AppResult<RestockRequest> {
        self.decide(request_id, RestockStatus::Rejected).await
    }

    async fn decide(&self, request_id: Uuid, decision: RestockStatus) -> AppResult<RestockRequest> {
        let mut tx = self.db.begin().await?;

        let current = sqlx::query_scalar::<_, String>(
            "SELECT status FROM restock_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Restock request".to_string()))?;

        let current = RestockStatus::parse(&current).ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("unknown restock status in store: {}", current))
        })?;

        if !current.can_transition_to(decision) {
            return Err(AppError::InvalidStateTransition(format!(
                "cannot move restock request from {} to {}",
                current.as_str(),
                decision.as_str()
            )));
        }

        let row = sqlx::query_as::<_, RestockRow>(
            r#"
            UPDATE restock_requests
            SET status = $1
            WHERE id = $2
            RETURNING id, article_id, quantity_requested, comment, requester_id, status, created_at
            "#,
        )
        .bind(decision.as_str())
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_request()
    }
}
