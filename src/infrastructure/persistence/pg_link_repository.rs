//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, map_sqlx_error};
use crate::utils::db_error::{
    ORIGINAL_URL_CONSTRAINT, SHORT_CODE_CONSTRAINT, is_unique_violation_on,
};

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    original_url: String,
    short_code: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
    visit_count: i64,
}

impl From<LinkRow> for ShortLink {
    fn from(row: LinkRow) -> Self {
        ShortLink::new(
            row.id,
            row.original_url,
            row.short_code,
            row.owner_id,
            row.created_at,
            row.visit_count,
        )
    }
}

const LINK_COLUMNS: &str = "id, original_url, short_code, owner_id, created_at, visit_count";

/// PostgreSQL repository for short link storage and retrieval.
///
/// Uniqueness of `original_url` and `short_code` is enforced by the
/// database; violated constraints are classified by name into the error
/// taxonomy. The visit counter increment is a single UPDATE so concurrent
/// redirects are serialized by the row lock.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let sql = format!(
            "INSERT INTO short_links (original_url, short_code, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(&new_link.original_url)
            .bind(&new_link.short_code)
            .bind(new_link.owner_id)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on(&e, ORIGINAL_URL_CONSTRAINT) {
                    AppError::duplicate(
                        "URL has already been shortened",
                        json!({ "original_url": new_link.original_url }),
                    )
                } else if is_unique_violation_on(&e, SHORT_CODE_CONSTRAINT) {
                    AppError::conflict(
                        "Short code already exists",
                        json!({ "short_code": new_link.short_code }),
                    )
                } else {
                    map_sqlx_error(e)
                }
            })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM short_links WHERE id = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM short_links WHERE short_code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_original_url(&self, url: &str) -> Result<Option<ShortLink>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM short_links WHERE original_url = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM short_links ORDER BY created_at DESC, id DESC");

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ShortLink>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM short_links
             WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(owner_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn record_visit(&self, id: i64) -> Result<i64, AppError> {
        // Single-statement read-modify-write; the row lock serializes
        // concurrent increments, so no visit is ever lost.
        let count: Option<i64> = sqlx::query_scalar(
            "UPDATE short_links SET visit_count = visit_count + 1
             WHERE id = $1 RETURNING visit_count",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        count.ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
