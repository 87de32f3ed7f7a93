//! Redis-backed resolution cache.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Namespace for every key this service writes.
const KEY_PREFIX: &str = "urlshort:";

/// Redis cache mapping `urlshort:{shortID}` to the original URL.
///
/// Entries always carry an expiry. Runtime errors are fail-open: they are
/// logged and reported as misses or no-ops, never as request failures.
pub struct RedisCache {
    conn: ConnectionManager,
    max_ttl: u64,
}

impl RedisCache {
    /// Opens a managed connection and checks it with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is rejected or the
    /// server cannot be reached.
    pub async fn connect(redis_url: &str, max_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = redis::Client::open(redis_url).map_err(connection_error)?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(connection_error)?;

        let cache = Self {
            conn,
            max_ttl: max_ttl_seconds,
        };

        cache
            .conn
            .clone()
            .ping::<()>()
            .await
            .map_err(connection_error)?;

        Ok(cache)
    }

    fn key(short_id: &str) -> String {
        format!("{KEY_PREFIX}{short_id}")
    }
}

fn connection_error(e: redis::RedisError) -> CacheError {
    CacheError::ConnectionError(e.to_string())
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_id: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();

        Ok(conn
            .get::<_, Option<String>>(Self::key(short_id))
            .await
            .inspect_err(|e| warn!(short_id, error = %e, "Redis GET failed"))
            .unwrap_or(None))
    }

    async fn set_url(
        &self,
        short_id: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let ttl = ttl_seconds.map_or(self.max_ttl, |t| t.min(self.max_ttl));
        if ttl == 0 {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        match conn
            .set_ex::<_, _, ()>(Self::key(short_id), original_url, ttl)
            .await
        {
            Ok(()) => debug!(short_id, ttl, "Cached mapping"),
            Err(e) => warn!(short_id, error = %e, "Redis SET failed"),
        }

        Ok(())
    }

    async fn invalidate(&self, short_id: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();

        if let Err(e) = conn.del::<_, i64>(Self::key(short_id)).await {
            warn!(short_id, error = %e, "Redis DEL failed");
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.conn.clone().ping::<()>().await.is_ok()
    }

    fn default_ttl_seconds(&self) -> u64 {
        self.max_ttl
    }
}
