//! PostgreSQL implementation of the mapping repository.
//!
//! PostgreSQL has no native TTL index, so expiry is enforced in two places:
//! lookups filter on `last_modified > now - ttl`, and [`MappingRepository::purge_expired`]
//! deletes what the filter already hides.

use async_trait::async_trait;
use chrono::{DateTime, Duration as TtlDuration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::ShortMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::with_deadline;

const SHORT_ID_INDEX: &str = "urls_short_id_idx";
const LAST_MODIFIED_INDEX: &str = "urls_last_modified_ttl_idx";

/// PostgreSQL repository for short mappings.
///
/// Holds a handle to the process-wide pool; cloning the `Arc` is the only
/// sharing between requests.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
    ttl: TtlDuration,
    timeout: Duration,
}

impl PgMappingRepository {
    /// Creates a repository with the given expiry TTL and per-call deadline.
    pub fn new(pool: Arc<PgPool>, ttl: TtlDuration, timeout: Duration) -> Self {
        Self { pool, ttl, timeout }
    }

    pub fn ttl(&self) -> TtlDuration {
        self.ttl
    }

    /// Oldest `last_modified` that is still live.
    ///
    /// A TTL reaching past the representable range keeps everything live.
    fn cutoff(&self) -> DateTime<Utc> {
        Utc::now()
            .checked_sub_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Counts all rows and the rows still live.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage failures.
    pub async fn counts(&self) -> Result<(i64, i64), AppError> {
        let cutoff = self.cutoff();

        with_deadline(
            "count",
            self.timeout,
            sqlx::query_as::<_, (i64, i64)>(
                r#"
                SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE last_modified > $1)
                FROM urls
                "#,
            )
            .bind(cutoff)
            .fetch_one(self.pool.as_ref()),
        )
        .await
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn create(&self, original_url: &str, short_id: &str) -> Result<ShortMapping, AppError> {
        with_deadline(
            "create",
            self.timeout,
            sqlx::query_as::<_, ShortMapping>(
                r#"
                INSERT INTO urls (short_id, original_url, last_modified)
                VALUES ($1, $2, $3)
                RETURNING short_id, original_url, last_modified
                "#,
            )
            .bind(short_id)
            .bind(original_url)
            .bind(Utc::now())
            .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn find_live(&self, short_id: &str) -> Result<Option<ShortMapping>, AppError> {
        let cutoff = self.cutoff();

        with_deadline(
            "find_live",
            self.timeout,
            sqlx::query_as::<_, ShortMapping>(
                r#"
                SELECT short_id, original_url, last_modified
                FROM urls
                WHERE short_id = $1
                  AND last_modified > $2
                ORDER BY last_modified DESC
                LIMIT 1
                "#,
            )
            .bind(short_id)
            .bind(cutoff)
            .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn purge_expired(&self) -> Result<u64, AppError> {
        let cutoff = self.cutoff();

        let result = with_deadline(
            "purge_expired",
            self.timeout,
            sqlx::query("DELETE FROM urls WHERE last_modified <= $1")
                .bind(cutoff)
                .execute(self.pool.as_ref()),
        )
        .await?;

        Ok(result.rows_affected())
    }

    async fn rebuild_indexes(&self) -> Result<(), AppError> {
        let pool = self.pool.as_ref();

        let existing: Vec<String> = with_deadline(
            "list_indexes",
            self.timeout,
            sqlx::query_scalar(
                r#"
                SELECT i.relname::text
                FROM pg_index x
                JOIN pg_class i ON i.oid = x.indexrelid
                JOIN pg_class t ON t.oid = x.indrelid
                JOIN pg_namespace n ON n.oid = t.relnamespace
                WHERE t.relname = 'urls'
                  AND n.nspname = current_schema()
                  AND NOT x.indisprimary
                "#,
            )
            .fetch_all(pool),
        )
        .await?;

        for index in &existing {
            let statement = format!("DROP INDEX IF EXISTS \"{}\"", index.replace('"', "\"\""));
            with_deadline("drop_index", self.timeout, sqlx::query(&statement).execute(pool))
                .await?;
            tracing::debug!(index = %index, "Dropped index");
        }

        let short_id_index =
            format!("CREATE INDEX IF NOT EXISTS {SHORT_ID_INDEX} ON urls (short_id)");
        with_deadline(
            "create_index",
            self.timeout,
            sqlx::query(&short_id_index).execute(pool),
        )
        .await?;

        let ttl_index =
            format!("CREATE INDEX IF NOT EXISTS {LAST_MODIFIED_INDEX} ON urls (last_modified)");
        with_deadline(
            "create_index",
            self.timeout,
            sqlx::query(&ttl_index).execute(pool),
        )
        .await?;

        tracing::info!(
            dropped = existing.len(),
            ttl_secs = self.ttl.num_seconds(),
            "Indexes {} and {} rebuilt",
            SHORT_ID_INDEX,
            LAST_MODIFIED_INDEX
        );

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        with_deadline(
            "ping",
            self.timeout,
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(self.pool.as_ref()),
        )
        .await?;

        Ok(())
    }
}
