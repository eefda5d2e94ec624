//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{LinkStats, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::utils::db_error::is_unique_violation_on_code;

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness of codes is enforced by the `urls_short_code_key` constraint;
/// `save` relies on it instead of a prior lookup.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    short_code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    click_count: i64,
}

impl From<UrlRow> for ShortLink {
    fn from(row: UrlRow) -> Self {
        Self {
            code: row.short_code,
            target_url: row.original_url,
            created_at: row.created_at,
            expires_at: row.expires_at,
            click_count: row.click_count,
        }
    }
}

impl From<UrlRow> for LinkStats {
    fn from(row: UrlRow) -> Self {
        Self {
            code: row.short_code,
            target_url: row.original_url,
            created_at: row.created_at,
            expires_at: row.expires_at,
            click_count: row.click_count,
        }
    }
}

fn backend_error(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

const SELECT_BY_CODE: &str = r#"
    SELECT short_code, original_url, created_at, expires_at, click_count
    FROM urls
    WHERE short_code = $1
"#;

impl PgLinkRepository {
    async fn fetch_row(&self, code: &str) -> Result<UrlRow, StoreError> {
        sqlx::query_as::<_, UrlRow>(SELECT_BY_CODE)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(backend_error)?
            .ok_or_else(|| StoreError::NotFound(code.to_string()))
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn save(&self, link: &ShortLink) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (short_code, original_url, created_at, expires_at, click_count)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (short_code) DO NOTHING
            "#,
        )
        .bind(&link.code)
        .bind(&link.target_url)
        .bind(link.created_at)
        .bind(link.expires_at)
        .bind(link.click_count)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                StoreError::DuplicateCode(link.code.clone())
            } else {
                backend_error(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::DuplicateCode(link.code.clone()));
        }

        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> Result<ShortLink, StoreError> {
        Ok(self.fetch_row(code).await?.into())
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE urls SET click_count = click_count + 1 WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(backend_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(code.to_string()));
        }

        Ok(())
    }

    async fn get_stats(&self, code: &str) -> Result<LinkStats, StoreError> {
        Ok(self.fetch_row(code).await?.into())
    }

    async fn delete_by_code(&self, code: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(backend_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(code.to_string()));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}
