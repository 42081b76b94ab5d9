//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Code-namespace uniqueness is enforced in the database: the unique indexes
/// on `auto_code` and `active_code` reject same-column races, and the
/// conditional insert/rename statements below guard collisions across the two
/// columns. The registry's pre-checks on top of this are optimizations only.
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
    async fn exists_code(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM links WHERE auto_code = $1 OR active_code = $1)",
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        // Check-and-write in one statement; a concurrent insert of the same
        // code that slips past the NOT EXISTS is still rejected by the unique
        // indexes, which surfaces as Conflict via the sqlx error mapping.
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (destination_url, auto_code, active_code, owner_id)
            SELECT $1, $2, $2, $3
            WHERE NOT EXISTS (
                SELECT 1 FROM links WHERE auto_code = $2 OR active_code = $2
            )
            RETURNING id, destination_url, auto_code, active_code, owner_id, click_count, created_at
            "#,
        )
        .bind(&new_link.destination_url)
        .bind(&new_link.code)
        .bind(new_link.owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        link.ok_or_else(|| {
            AppError::conflict("code already exists", json!({ "code": new_link.code }))
        })
    }

    async fn find_by_active_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, destination_url, auto_code, active_code, owner_id, click_count, created_at
            FROM links
            WHERE active_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, destination_url, auto_code, active_code, owner_id, click_count, created_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, destination_url, auto_code, active_code, owner_id, click_count, created_at
            FROM links
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn rename_active_code(&self, link_id: i64, new_code: &str) -> Result<(), AppError> {
        // The update only lands when no other row holds the code in either
        // column; auto_code is deliberately never written.
        let result = sqlx::query(
            r#"
            UPDATE links
            SET active_code = $2
            WHERE id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM links other
                  WHERE other.id <> $1
                    AND (other.auto_code = $2 OR other.active_code = $2)
              )
            "#,
        )
        .bind(link_id)
        .bind(new_code)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Zero rows means either the link is missing or the code is taken.
        let link_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM links WHERE id = $1)")
                .bind(link_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        if link_exists {
            Err(AppError::conflict(
                "code already exists",
                json!({ "code": new_code }),
            ))
        } else {
            Err(AppError::not_found("Link not found", json!({ "id": link_id })))
        }
    }

    async fn increment_click(&self, link_id: i64) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE id = $1")
                .bind(link_id)
                .execute(self.pool.as_ref())
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "id": link_id }),
            ));
        }

        Ok(())
    }
}
