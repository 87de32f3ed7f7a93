//! Background sweep that physically removes expired mappings.
//!
//! Resolution already hides mappings past their TTL; the reaper only reclaims
//! storage. A failed sweep is logged and retried on the next tick, it never
//! stops the loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::domain::repositories::MappingRepository;

/// Runs expiry sweeps every `period` until `shutdown` flips to `true`.
///
/// The first sweep happens immediately so rows that expired while the service
/// was down are cleared at startup.
pub async fn run_reaper(
    repository: Arc<dyn MappingRepository>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(period_secs = period.as_secs(), "Reaper started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                sweep_once(repository.as_ref()).await;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Reaper stopped");
}

/// Runs a single sweep, returning the number of removed mappings.
///
/// Errors are logged and reported as zero removals.
pub async fn sweep_once(repository: &dyn MappingRepository) -> u64 {
    match repository.purge_expired().await {
        Ok(0) => {
            debug!("Reaper sweep: nothing expired");
            0
        }
        Ok(removed) => {
            info!(removed, "Reaper sweep removed expired mappings");
            removed
        }
        Err(e) => {
            warn!(error = %e, "Reaper sweep failed, will retry next tick");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use crate::error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_sweep_reports_removed_count() {
        let mut repo = MockMappingRepository::new();
        repo.expect_purge_expired().times(1).returning(|| Ok(3));

        assert_eq!(sweep_once(&repo).await, 3);
    }

    #[tokio::test]
    async fn test_sweep_swallows_storage_errors() {
        let mut repo = MockMappingRepository::new();
        repo.expect_purge_expired()
            .times(1)
            .returning(|| Err(AppError::persistence("Database error", json!({}))));

        assert_eq!(sweep_once(&repo).await, 0);
    }

    #[tokio::test]
    async fn test_reaper_stops_on_shutdown() {
        let mut repo = MockMappingRepository::new();
        repo.expect_purge_expired().returning(|| Ok(0));

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(run_reaper(
            Arc::new(repo),
            Duration::from_secs(3600),
            rx,
        ));

        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("reaper did not stop")
            .unwrap();
    }
}
