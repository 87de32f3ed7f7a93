mod common;

use chrono::Duration;
use sqlx::PgPool;
use url_shortener::domain::repositories::MappingRepository;

#[sqlx::test]
async fn test_create_mapping(pool: PgPool) {
    let repo = common::create_repository(pool.clone());

    let mapping = repo.create("https://example.com", "aB3dE9z").await.unwrap();

    assert_eq!(mapping.short_id, "aB3dE9z");
    assert_eq!(mapping.original_url, "https://example.com");
    assert_eq!(common::count_mappings(&pool, "aB3dE9z").await, 1);
}

#[sqlx::test]
async fn test_create_does_not_check_uniqueness(pool: PgPool) {
    let repo = common::create_repository(pool.clone());

    repo.create("https://first.com", "1234567").await.unwrap();
    repo.create("https://second.com", "1234567").await.unwrap();

    assert_eq!(common::count_mappings(&pool, "1234567").await, 2);
}

#[sqlx::test]
async fn test_find_live(pool: PgPool) {
    common::insert_mapping(&pool, "abc1234", "https://example.com", Duration::minutes(5)).await;
    let repo = common::create_repository(pool);

    let mapping = repo.find_live("abc1234").await.unwrap();

    assert!(mapping.is_some());
    assert_eq!(mapping.unwrap().original_url, "https://example.com");
}

#[sqlx::test]
async fn test_find_live_not_found(pool: PgPool) {
    let repo = common::create_repository(pool);

    let result = repo.find_live("nosuch1").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_find_live_is_case_sensitive(pool: PgPool) {
    common::insert_mapping(&pool, "AbCdEfG", "https://example.com", Duration::zero()).await;
    let repo = common::create_repository(pool);

    assert!(repo.find_live("abcdefg").await.unwrap().is_none());
    assert!(repo.find_live("AbCdEfG").await.unwrap().is_some());
}

#[sqlx::test]
async fn test_find_live_hides_expired_before_reaping(pool: PgPool) {
    common::insert_mapping(&pool, "old1234", "https://example.com", Duration::hours(25)).await;
    let repo = common::create_repository(pool.clone());

    assert!(repo.find_live("old1234").await.unwrap().is_none());
    // Still physically present until the sweep runs.
    assert_eq!(common::count_mappings(&pool, "old1234").await, 1);
}

#[sqlx::test]
async fn test_find_live_prefers_newest_duplicate(pool: PgPool) {
    common::insert_mapping(&pool, "dup1234", "https://older.com", Duration::hours(2)).await;
    common::insert_mapping(&pool, "dup1234", "https://newer.com", Duration::minutes(1)).await;
    let repo = common::create_repository(pool);

    let mapping = repo.find_live("dup1234").await.unwrap().unwrap();

    assert_eq!(mapping.original_url, "https://newer.com");
}

#[sqlx::test]
async fn test_purge_expired(pool: PgPool) {
    common::insert_mapping(&pool, "live123", "https://live.com", Duration::hours(1)).await;
    common::insert_mapping(&pool, "dead123", "https://dead.com", Duration::hours(25)).await;
    common::insert_mapping(&pool, "dead456", "https://dead.com", Duration::days(3)).await;
    let repo = common::create_repository(pool.clone());

    let removed = repo.purge_expired().await.unwrap();

    assert_eq!(removed, 2);
    assert_eq!(common::count_all(&pool).await, 1);
    assert!(repo.find_live("live123").await.unwrap().is_some());
}

#[sqlx::test]
async fn test_rebuild_indexes_is_idempotent(pool: PgPool) {
    let repo = common::create_repository(pool.clone());

    repo.rebuild_indexes().await.unwrap();
    repo.rebuild_indexes().await.unwrap();

    let indexes: Vec<String> = sqlx::query_scalar(
        "SELECT indexname::text FROM pg_indexes WHERE tablename = 'urls' ORDER BY indexname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(indexes.contains(&"urls_short_id_idx".to_string()));
    assert!(indexes.contains(&"urls_last_modified_ttl_idx".to_string()));
    assert_eq!(indexes.len(), 3, "unexpected indexes: {indexes:?}");
}

#[sqlx::test]
async fn test_rebuild_indexes_drops_stale_indexes(pool: PgPool) {
    sqlx::query("CREATE INDEX legacy_ttl_idx ON urls (last_modified DESC)")
        .execute(&pool)
        .await
        .unwrap();
    let repo = common::create_repository(pool.clone());

    repo.rebuild_indexes().await.unwrap();

    let stale: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pg_indexes WHERE tablename = 'urls' AND indexname = 'legacy_ttl_idx'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(stale, 0);
}

#[sqlx::test]
async fn test_counts(pool: PgPool) {
    common::insert_mapping(&pool, "live123", "https://live.com", Duration::hours(1)).await;
    common::insert_mapping(&pool, "dead123", "https://dead.com", Duration::hours(30)).await;
    let repo = common::create_repository(pool);

    assert_eq!(repo.counts().await.unwrap(), (2, 1));
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = common::create_repository(pool);

    assert!(repo.ping().await.is_ok());
}
