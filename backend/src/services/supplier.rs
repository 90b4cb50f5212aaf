//! Article-supplier association service
//!
//! Links articles to the users that supply them, with per-supplier
//! reference and price. At most one association per article is marked
//! preferred; flipping the flag clears the others in the same
//! transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::ArticleSupplier;
use crate::services::article;

/// Supplier service for managing article sourcing
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Input for creating an article-supplier association
#[derive(Debug, Deserialize)]
pub struct CreateAssociationInput {
    pub article_id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_reference: Option<String>,
    pub supplier_price: Decimal,
    pub is_preferred: Option<bool>,
}

/// Input for updating an association's reference or price
#[derive(Debug, Deserialize)]
pub struct UpdateAssociationInput {
    pub supplier_reference: Option<String>,
    pub supplier_price: Option<Decimal>,
}

#[derive(Debug, FromRow)]
struct AssociationRow {
    id: Uuid,
    article_id: Uuid,
    supplier_id: Uuid,
    supplier_reference: String,
    supplier_price: Decimal,
    is_preferred: bool,
    created_at: DateTime<Utc>,
}

impl AssociationRow {
    fn into_association(self) -> ArticleSupplier {
        ArticleSupplier {
            id: self.id,
            article_id: self.article_id,
            supplier_id: self.supplier_id,
            supplier_reference: self.supplier_reference,
            supplier_price: self.supplier_price,
            is_preferred: self.is_preferred,
            created_at: self.created_at,
        }
    }
}

const ASSOCIATION_SELECT: &str = r#"
    SELECT id, article_id, supplier_id, supplier_reference, supplier_price,
           is_preferred, created_at
    FROM article_suppliers
"#;

fn validate_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation {
            field: "supplier_price".to_string(),
            message: "Supplier price cannot be negative".to_string(),
            message_fr: "Le prix fournisseur ne peut être négatif".to_string(),
        });
    }
    Ok(())
}

impl SupplierService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<ArticleSupplier>> {
        let sql = format!("{} ORDER BY created_at DESC", ASSOCIATION_SELECT);
        let rows = sqlx::query_as::<_, AssociationRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(AssociationRow::into_association).collect())
    }

    pub async fn get(&self, association_id: Uuid) -> AppResult<ArticleSupplier> {
        let sql = format!("{} WHERE id = $1", ASSOCIATION_SELECT);
        let row = sqlx::query_as::<_, AssociationRow>(&sql)
            .bind(association_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Article supplier".to_string()))?;

        Ok(row.into_association())
    }

    pub async fn create(&self, input: CreateAssociationInput) -> AppResult<ArticleSupplier> {
        validate_price(input.supplier_price)?;

        let mut tx = self.db.begin().await?;

        article::ensure_article_exists(&mut tx, input.article_id).await?;

        let supplier_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(input.supplier_id)
                .fetch_one(&mut *tx)
                .await?;
        if !supplier_exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        let duplicate = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM article_suppliers WHERE article_id = $1 AND supplier_id = $2",
        )
        .bind(input.article_id)
        .bind(input.supplier_id)
        .fetch_one(&mut *tx)
        .await?;
        if duplicate > 0 {
            return Err(AppError::DuplicateAssociation(
                "article supplier".to_string(),
            ));
        }

        let is_preferred = input.is_preferred.unwrap_or(false);
        if is_preferred {
            sqlx::query("UPDATE article_suppliers SET is_preferred = FALSE WHERE article_id = $1")
                .bind(input.article_id)
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, AssociationRow>(
            r#"
            INSERT INTO article_suppliers (article_id, supplier_id, supplier_reference, supplier_price, is_preferred)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, article_id, supplier_id, supplier_reference, supplier_price, is_preferred, created_at
            "#,
        )
        .bind(input.article_id)
        .bind(input.supplier_id)
        .bind(input.supplier_reference.unwrap_or_default())
        .bind(input.supplier_price)
        .bind(is_preferred)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_association())
    }

    pub async fn update(
        &self,
        association_id: Uuid,
        input: UpdateAssociationInput,
    ) -> AppResult<ArticleSupplier> {
        let existing = self.get(association_id).await?;

        let supplier_reference = input
            .supplier_reference
            .unwrap_or(existing.supplier_reference);
        let supplier_price = input.supplier_price.unwrap_or(existing.supplier_price);
        validate_price(supplier_price)?;

        let row = sqlx::query_as::<_, AssociationRow>(
            r#"
            UPDATE article_suppliers
            SET supplier_reference = $1, supplier_price = $2
            WHERE id = $3
            RETURNING id, article_id, supplier_id, supplier_reference, supplier_price, is_preferred, created_at
            "#,
        )
        .bind(&supplier_reference)
        .bind(supplier_price)
        .bind(association_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_association())
    }

    pub async fn delete(&self, association_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM article_suppliers WHERE id = $1")
            .bind(association_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Article supplier".to_string()));
        }

        Ok(())
    }

    /// Mark an association as the preferred source for its article.
    ///
    /// The reset and the set run in one transaction, so the article
    /// never ends up with two preferred suppliers.
    pub async fn set_preferred(&self, association_id: Uuid) -> AppResult<ArticleSupplier> {
        let mut tx = self.db.begin().await?;

        let article_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT article_id FROM article_suppliers WHERE id = $1 FOR UPDATE",
        )
        .bind(association_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Article supplier".to_string()))?;

        sqlx::query("UPDATE article_suppliers SET is_preferred = FALSE WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, AssociationRow>(
            r#"
            UPDATE article_suppliers
            SET is_preferred = TRUE
            WHERE id = $1
            RETURNING id, article_id, supplier_id, supplier_reference, supplier_price, is_preferred, created_at
            "#,
        )
        .bind(association_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_association())
    }

    /// Associations for one article
    pub async fn list_for_article(&self, article_id: Uuid) -> AppResult<Vec<ArticleSupplier>> {
        let mut conn = self.db.acquire().await?;
        article::ensure_article_exists(&mut conn, article_id).await?;

        let sql = format!(
            "{} WHERE article_id = $1 ORDER BY is_preferred DESC, created_at",
            ASSOCIATION_SELECT
        );
        let rows = sqlx::query_as::<_, AssociationRow>(&sql)
            .bind(article_id)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(AssociationRow::into_association).collect())
    }

    /// Articles sourced from one supplier
    pub async fn list_for_supplier(&self, supplier_id: Uuid) -> AppResult<Vec<ArticleSupplier>> {
        let sql = format!(
            "{} WHERE supplier_id = $1 ORDER BY created_at",
            ASSOCIATION_SELECT
        );
        let rows = sqlx::query_as::<_, AssociationRow>(&sql)
            .bind(supplier_id)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(AssociationRow::into_association).collect())
    }
}
