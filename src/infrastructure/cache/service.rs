//! Cache service trait and error types.

use async_trait::async_trait;

/// Cache failures. Only connecting can fail; runtime errors degrade to misses.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of short ID → original URL.
///
/// Callers must bound every entry's TTL by the remaining lifetime of the
/// mapping it caches, so a cache hit can never resurrect an expired mapping.
/// Implementations are fail-open: backend errors degrade to misses.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached original URL, `Ok(None)` on miss.
    async fn get_url(&self, short_id: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping for at most `ttl_seconds`.
    ///
    /// `None` uses the implementation default.
    async fn set_url(
        &self,
        short_id: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping.
    async fn invalidate(&self, short_id: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Upper bound applied to entry TTLs.
    fn default_ttl_seconds(&self) -> u64;
}
