//! HTTP server initialization and runtime setup.
//!
//! Handles the connection pool, schema and index setup, cache selection, the
//! expiry reaper, and the Axum server lifecycle including graceful shutdown.

use crate::application::services::ShortLinkService;
use crate::config::Config;
use crate::domain::reaper::run_reaper;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::PgMappingRepository;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::id_generator::IdGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Number of connection attempts made at startup before giving up.
const CONNECT_ATTEMPTS: usize = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with retry)
/// - Migrations and index rebuild
/// - Redis cache (or NullCache fallback)
/// - Background expiry reaper
/// - Axum HTTP server
///
/// On Ctrl+C / SIGTERM the server stops accepting connections, drains
/// in-flight requests, stops the reaper and closes the pool.
///
/// # Errors
///
/// Returns an error if the database cannot be reached at startup, schema setup
/// fails, or the listener cannot bind. Storage errors after startup are
/// reported per request and never stop the server.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    let pool = Arc::new(pool);
    let repository = Arc::new(PgMappingRepository::new(
        pool.clone(),
        config.short_url_ttl(),
        config.storage_timeout(),
    ));

    prepare_schema(pool.as_ref(), repository.as_ref()).await?;

    let cache = connect_cache(&config).await;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reaper = tokio::spawn(run_reaper(
        repository.clone(),
        config.reaper_interval(),
        shutdown_rx,
    ));

    let link_service = ShortLinkService::new(
        repository,
        cache,
        IdGenerator::new(config.short_id_length, config.test_mode),
        config.base_url.clone(),
        config.short_url_ttl(),
    );
    let state = AppState::new(Arc::new(link_service));

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, shutting down background tasks");

    let _ = shutdown_tx.send(true);
    if let Err(e) = reaper.await {
        tracing::warn!("Reaper task ended abnormally: {}", e);
    }

    pool.close().await;
    tracing::info!("Database pool closed");

    Ok(())
}

/// Creates the process-wide pool, retrying with exponential backoff.
///
/// # Errors
///
/// Returns the last connection error after [`CONNECT_ATTEMPTS`] failures.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(CONNECT_ATTEMPTS - 1);

    Retry::start(strategy, || async {
        PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(&config.database_url)
            .await
            .inspect_err(|e| tracing::warn!("Database connection attempt failed: {}", e))
    })
    .await
    .context("Failed to connect to database")
}

/// Ensures the `urls` table exists and rebuilds its indexes.
///
/// # Errors
///
/// Returns an error if migrations or the index rebuild fail.
pub async fn prepare_schema(pool: &PgPool, repository: &dyn MappingRepository) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    repository
        .rebuild_indexes()
        .await
        .context("Failed to rebuild indexes")?;

    Ok(())
}

async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) if redis.health_check().await => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Ok(_) => {
            tracing::warn!("Redis did not answer PING. Using NullCache.");
            Arc::new(NullCache::new())
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Resolves when Ctrl+C or (on Unix) SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
