//! Article ledger service
//!
//! Owns the authoritative stock quantity per article. The quantity column is
//! only written through [`apply_stock_delta`], which the movement recorder
//! and the order receipt processor call inside their own transactions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Article, Category};
use shared::validation;

/// Article service for catalogue management and stock queries
#[derive(Clone)]
pub struct ArticleService {
    db: PgPool,
}

/// Input for creating an article
#[derive(Debug, Deserialize)]
pub struct CreateArticleInput {
    pub name: String,
    pub category_id: Option<Uuid>,
    pub unit_price: Decimal,
    /// Initial stock level; subsequent changes go through movements
    pub quantity: Option<i32>,
    pub critical_threshold: Option<i32>,
}

/// Input for updating an article. The stock quantity is deliberately
/// absent: it is owned by the ledger.
#[derive(Debug, Deserialize)]
pub struct UpdateArticleInput {
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
    pub unit_price: Option<Decimal>,
    pub critical_threshold: Option<i32>,
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: Uuid,
    name: String,
    reference: Uuid,
    unit_price: Decimal,
    quantity: i32,
    critical_threshold: i32,
    created_at: DateTime<Utc>,
    category_id: Option<Uuid>,
    category_name: Option<String>,
    category_description: Option<String>,
}

impl ArticleRow {
    fn into_article(self) -> Article {
        let category = match (self.category_id, self.category_name) {
            (Some(id), Some(name)) => Some(Category {
                id,
                name,
                description: self.category_description.unwrap_or_default(),
            }),
            _ => None,
        };

        Article {
            id: self.id,
            name: self.name,
            reference: self.reference,
            category,
            unit_price: self.unit_price,
            quantity: self.quantity,
            critical_threshold: self.critical_threshold,
            is_critical: validation::is_critical(self.quantity, self.critical_threshold),
            created_at: self.created_at,
        }
    }
}

const ARTICLE_SELECT: &str = r#"
    SELECT a.id, a.name, a.reference, a.unit_price, a.quantity, a.critical_threshold,
           a.created_at, c.id AS category_id, c.name AS category_name,
           c.description AS category_description
    FROM articles a
    LEFT JOIN categories c ON c.id = a.category_id
"#;

/// Apply a signed delta to an article's stock quantity.
///
/// A single conditional update keeps the read and the write in one
/// statement, so concurrent adjustments to the same article serialize on
/// the row without a lost-update window. A delta that would drive the
/// quantity negative rejects the whole call; nothing is written.
pub(crate) async fn apply_stock_delta(
    conn: &mut PgConnection,
    article_id: Uuid,
    delta: i32,
) -> AppResult<i32> {
    let updated = sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE articles
        SET quantity = quantity + $2
        WHERE id = $1 AND quantity + $2 >= 0
        RETURNING quantity
        "#,
    )
    .bind(article_id)
    .bind(delta)
    .fetch_optional(&mut *conn)
    .await?;

    match updated {
        Some(quantity) => Ok(quantity),
        None => {
            let current =
                sqlx::query_scalar::<_, i32>("SELECT quantity FROM articles WHERE id = $1")
                    .bind(article_id)
                    .fetch_optional(&mut *conn)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Article".to_string()))?;

            Err(AppError::InsufficientStock {
                available: current,
                requested: -delta,
            })
        }
    }
}

/// Check that an article exists without touching its quantity
pub(crate) async fn ensure_article_exists(
    conn: &mut PgConnection,
    article_id: Uuid,
) -> AppResult<()> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM articles WHERE id = $1)")
        .bind(article_id)
        .fetch_one(&mut *conn)
        .await?;

    if !exists {
        return Err(AppError::NotFound("Article".to_string()));
    }
    Ok(())
}

impl ArticleService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<Article>> {
        let sql = format!("{} ORDER BY a.name", ARTICLE_SELECT);
        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(ArticleRow::into_article).collect())
    }

    /// Articles at or below their critical threshold
    pub async fn list_critical(&self) -> AppResult<Vec<Article>> {
        let sql = format!(
            "{} WHERE a.quantity <= a.critical_threshold ORDER BY a.name",
            ARTICLE_SELECT
        );
        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(ArticleRow::into_article).collect())
    }

    pub async fn get(&self, article_id: Uuid) -> AppResult<Article> {
        let sql = format!("{} WHERE a.id = $1", ARTICLE_SELECT);
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(article_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Article".to_string()))?;

        Ok(row.into_article())
    }

    pub async fn create(&self, input: CreateArticleInput) -> AppResult<Article> {
        if input.unit_price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_price".to_string(),
                message: "Unit price cannot be negative".to_string(),
                message_fr: "Le prix unitaire ne peut être négatif".to_string(),
            });
        }

        let quantity = input.quantity.unwrap_or(0);
        let critical_threshold = input.critical_threshold.unwrap_or(5);

        if quantity < 0 {
            return Err(AppError::InvalidQuantity(
                "initial quantity cannot be negative".to_string(),
            ));
        }
        if critical_threshold < 0 {
            return Err(AppError::Validation {
                field: "critical_threshold".to_string(),
                message: "Critical threshold cannot be negative".to_string(),
                message_fr: "Le seuil critique ne peut être négatif".to_string(),
            });
        }

        if let Some(category_id) = input.category_id {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                    .bind(category_id)
                    .fetch_one(&self.db)
                    .await?;
            if !exists {
                return Err(AppError::NotFound("Category".to_string()));
            }
        }

        let article_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO articles (name, category_id, unit_price, quantity, critical_threshold)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(input.category_id)
        .bind(input.unit_price)
        .bind(quantity)
        .bind(critical_threshold)
        .fetch_one(&self.db)
        .await?;

        self.get(article_id).await
    }

    pub async fn update(&self, article_id: Uuid, input: UpdateArticleInput) -> AppResult<Article> {
        let existing = self.get(article_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let unit_price = input.unit_price.unwrap_or(existing.unit_price);
        let critical_threshold = input
            .critical_threshold
            .unwrap_or(existing.critical_threshold);
        let category_id = input
            .category_id
            .or(existing.category.map(|c| c.id));

        if unit_price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_price".to_string(),
                message: "Unit price cannot be negative".to_string(),
                message_fr: "Le prix unitaire ne peut être négatif".to_string(),
            });
        }
        if critical_threshold < 0 {
            return Err(AppError::Validation {
                field: "critical_threshold".to_string(),
                message: "Critical threshold cannot be negative".to_string(),
                message_fr: "Le seuil critique ne peut être négatif".to_string(),
            });
        }

        if let Some(category_id) = category_id {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                    .bind(category_id)
                    .fetch_one(&self.db)
                    .await?;
            if !exists {
                return Err(AppError::NotFound("Category".to_string()));
            }
        }

        sqlx::query(
            r#"
            UPDATE articles
            SET name = $1, category_id = $2, unit_price = $3, critical_threshold = $4
            WHERE id = $5
            "#,
        )
        .bind(&name)
        .bind(category_id)
        .bind(unit_price)
        .bind(critical_threshold)
        .bind(article_id)
        .execute(&self.db)
        .await?;

        self.get(article_id).await
    }

    pub async fn delete(&self, article_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(article_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Article".to_string()));
        }

        Ok(())
    }
}
