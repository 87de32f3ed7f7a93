//! Repository trait for short mapping storage.

use crate::domain::entities::ShortMapping;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for short mappings.
///
/// The store owns the expiry policy: it is configured with a single TTL and
/// never returns a mapping older than that from [`MappingRepository::find_live`].
/// Every call is bounded by a deadline; exceeding it yields
/// [`AppError::Persistence`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists a new mapping with `last_modified` set to the current time.
    ///
    /// No uniqueness check is made on `short_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if storage is unreachable or the write is rejected.
    async fn create(&self, original_url: &str, short_id: &str) -> Result<ShortMapping, AppError>;

    /// Finds the live mapping for an exact short ID.
    ///
    /// Mappings past their TTL are never returned, whether or not the reaper
    /// has removed them yet. If several live rows share the ID, the most
    /// recently created one wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage failures.
    async fn find_live(&self, short_id: &str) -> Result<Option<ShortMapping>, AppError>;

    /// Deletes every mapping past its TTL and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage failures.
    async fn purge_expired(&self) -> Result<u64, AppError>;

    /// Drops and recreates the lookup and expiry indexes.
    ///
    /// Idempotent; safe to run on every startup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage failures.
    async fn rebuild_indexes(&self) -> Result<(), AppError>;

    /// Checks that storage answers within the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if storage is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
