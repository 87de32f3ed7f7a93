#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use url_shortener::application::services::ShortLinkService;
use url_shortener::infrastructure::cache::NullCache;
use url_shortener::infrastructure::persistence::PgMappingRepository;
use url_shortener::state::AppState;
use url_shortener::utils::id_generator::IdGenerator;

pub const BASE_URL: &str = "http://localhost:3000/urlshort";

pub fn test_ttl() -> Duration {
    Duration::days(1)
}

pub fn create_repository(pool: PgPool) -> PgMappingRepository {
    PgMappingRepository::new(Arc::new(pool), test_ttl(), StdDuration::from_secs(5))
}

/// Inserts a mapping whose `last_modified` lies `age` in the past.
pub async fn insert_mapping(pool: &PgPool, short_id: &str, url: &str, age: Duration) {
    sqlx::query("INSERT INTO urls (short_id, original_url, last_modified) VALUES ($1, $2, $3)")
        .bind(short_id)
        .bind(url)
        .bind(Utc::now() - age)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_mappings(pool: &PgPool, short_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE short_id = $1")
        .bind(short_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_all(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool, test_mode: bool) -> AppState {
    let repository = Arc::new(create_repository(pool));

    let link_service = ShortLinkService::new(
        repository,
        Arc::new(NullCache::new()),
        IdGenerator::new(7, test_mode),
        BASE_URL,
        test_ttl(),
    );

    AppState::new(Arc::new(link_service))
}
