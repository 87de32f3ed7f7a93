//! Short mapping entity: the only persisted record of the service.

use chrono::{DateTime, Duration, Utc};

/// A short ID bound to an original URL.
///
/// Mappings are written once and never updated. `last_modified` is set at
/// creation and only drives expiry.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortMapping {
    pub short_id: String,
    pub original_url: String,
    pub last_modified: DateTime<Utc>,
}

impl ShortMapping {
    pub fn new(short_id: String, original_url: String, last_modified: DateTime<Utc>) -> Self {
        Self {
            short_id,
            original_url,
            last_modified,
        }
    }

    /// Instant at which the mapping stops being resolvable.
    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        self.last_modified + ttl
    }

    /// Returns true once the mapping's age exceeds `ttl` at `now`.
    pub fn is_expired_at(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now >= self.expires_at(ttl)
    }

    /// Time left before expiry, or `None` if already expired.
    pub fn remaining_ttl(&self, ttl: Duration, now: DateTime<Utc>) -> Option<Duration> {
        if self.is_expired_at(ttl, now) {
            return None;
        }

        Some(self.expires_at(ttl) - now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping_created_at(last_modified: DateTime<Utc>) -> ShortMapping {
        ShortMapping::new(
            "aB3dE9z".to_string(),
            "https://example.com".to_string(),
            last_modified,
        )
    }

    #[test]
    fn test_fresh_mapping_is_live() {
        let now = Utc::now();
        let mapping = mapping_created_at(now);

        assert!(!mapping.is_expired_at(Duration::days(1), now));
        assert_eq!(mapping.expires_at(Duration::days(1)), now + Duration::days(1));
    }

    #[test]
    fn test_mapping_expires_after_ttl() {
        let created = Utc::now() - Duration::hours(25);
        let mapping = mapping_created_at(created);

        assert!(mapping.is_expired_at(Duration::days(1), Utc::now()));
        assert!(mapping.remaining_ttl(Duration::days(1), Utc::now()).is_none());
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let created = Utc::now();
        let ttl = Duration::seconds(60);
        let mapping = mapping_created_at(created);

        assert!(!mapping.is_expired_at(ttl, created + Duration::seconds(59)));
        assert!(mapping.is_expired_at(ttl, created + ttl));
    }

    #[test]
    fn test_remaining_ttl() {
        let now = Utc::now();
        let mapping = mapping_created_at(now - Duration::seconds(30));

        let remaining = mapping.remaining_ttl(Duration::seconds(90), now).unwrap();
        assert_eq!(remaining, Duration::seconds(60));
    }
}
