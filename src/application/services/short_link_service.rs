//! Short link creation and resolution service.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::ShortMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::id_generator::IdGenerator;
use crate::utils::url_validation::validate_original_url;

/// Service for creating and resolving short links.
///
/// # Collisions
///
/// Short IDs are generated without checking for existing rows and a write is
/// never retried. Two creations of the same URL yield two mappings.
///
/// # Cache fills
///
/// A resolve fills the cache in the background. Every create bumps a write
/// counter, and a fill started before that bump is dropped, so a slow fill
/// cannot put back a URL that a create just invalidated. A fill that passed
/// the check right before a concurrent create can still land; the entry then
/// lives at most the cache TTL.
pub struct ShortLinkService {
    repository: Arc<dyn MappingRepository>,
    cache: Arc<dyn CacheService>,
    generator: IdGenerator,
    base_url: String,
    ttl: Duration,
    writes: Arc<AtomicU64>,
}

impl ShortLinkService {
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
        generator: IdGenerator,
        base_url: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            generator,
            base_url: base_url.into(),
            ttl,
            writes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a new mapping for `original_url` under a freshly generated ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or unparseable; nothing
    /// is persisted in that case.
    ///
    /// Returns [`AppError::Persistence`] if the write fails.
    pub async fn create_short_link(&self, original_url: &str) -> Result<ShortMapping, AppError> {
        validate_original_url(original_url)?;

        let short_id = self.generator.generate();
        let mapping = self.repository.create(original_url, &short_id).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);

        if let Err(e) = self.cache.invalidate(&mapping.short_id).await {
            warn!("Failed to invalidate cache for {}: {}", mapping.short_id, e);
        }

        info!(short_id = %mapping.short_id, "Short link created");

        Ok(mapping)
    }

    /// Resolves a short ID to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `short_id` is empty.
    ///
    /// Returns [`AppError::NotFound`] if no live mapping matches, either because
    /// none was created or because it expired.
    ///
    /// Returns [`AppError::Persistence`] on storage failures.
    pub async fn resolve(&self, short_id: &str) -> Result<String, AppError> {
        if short_id.is_empty() {
            return Err(AppError::bad_request(
                "Short ID not sent!",
                json!({ "field": "shortID" }),
            ));
        }

        match self.cache.get_url(short_id).await {
            Ok(Some(url)) => {
                debug!("Cache HIT for {}", short_id);
                return Ok(url);
            }
            Ok(None) => debug!("Cache MISS for {}", short_id),
            Err(e) => warn!("Cache error for {}: {}", short_id, e),
        }

        let writes_seen = self.writes.load(Ordering::SeqCst);
        let mapping = self
            .repository
            .find_live(short_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "shortID": short_id }))
            })?;

        self.cache_mapping(&mapping, writes_seen);

        Ok(mapping.original_url)
    }

    /// Composes the public short URL for an ID.
    pub fn short_url(&self, short_id: &str) -> String {
        format!("{}/s/{}", self.base_url.trim_end_matches('/'), short_id)
    }

    /// Returns true if the mapping store answers a ping.
    pub async fn is_store_online(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Mapping store ping failed: {}", e);
                false
            }
        }
    }

    /// Writes the mapping to the cache in the background.
    ///
    /// The entry TTL never exceeds the mapping's remaining lifetime. The write
    /// is skipped if a create happened after `writes_seen` was read.
    fn cache_mapping(&self, mapping: &ShortMapping, writes_seen: u64) {
        let Some(remaining) = mapping.remaining_ttl(self.ttl, Utc::now()) else {
            return;
        };

        let ttl_seconds = (remaining.num_seconds().max(0) as u64)
            .min(self.cache.default_ttl_seconds());
        if ttl_seconds == 0 {
            return;
        }

        let cache = self.cache.clone();
        let writes = self.writes.clone();
        let short_id = mapping.short_id.clone();
        let original_url = mapping.original_url.clone();
        tokio::spawn(async move {
            if writes.load(Ordering::SeqCst) != writes_seen {
                debug!("Skipping stale cache fill for {}", short_id);
                return;
            }

            if let Err(e) = cache
                .set_url(&short_id, &original_url, Some(ttl_seconds))
                .await
            {
                warn!("Failed to cache {}: {}", short_id, e);
            }
        });
    }
}
