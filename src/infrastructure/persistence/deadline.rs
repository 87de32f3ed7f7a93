//! Call-scoped deadlines for storage operations.

use std::future::Future;
use std::time::Duration;

use serde_json::json;

use crate::error::AppError;

/// Runs a storage future under `limit`.
///
/// `op` names the operation in logs and error details. Both a timed-out call
/// and a failed call become [`AppError::Persistence`].
pub async fn with_deadline<T, F>(op: &'static str, limit: Duration, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            tracing::warn!(op, error = %e, "Storage operation failed");
            Err(e.into())
        }
        Err(_) => {
            tracing::warn!(op, timeout_ms = limit.as_millis() as u64, "Storage deadline exceeded");
            Err(AppError::persistence(
                "Storage deadline exceeded",
                json!({ "op": op, "timeout_ms": limit.as_millis() as u64 }),
            ))
        }
    }
}
