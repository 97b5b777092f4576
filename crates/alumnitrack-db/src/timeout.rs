use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::StoreError;

/// Runs one store operation under `limit`.
pub(crate) async fn bounded<T, F>(limit: Duration, operation: &'static str, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                db.operation = operation,
                timeout_ms = limit.as_millis() as u64,
                "Store operation timed out"
            );
            Err(StoreError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_slow_operation_times_out() {
        let result: Result<(), _> = bounded(Duration::from_secs(10), "slow", async {
            tokio::time::sleep(Duration::from_secs(11)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(StoreError::Timeout)));
    }

    #[tokio::test]
    async fn test_fast_operation_passes_through() {
        let result = bounded(Duration::from_secs(1), "fast", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);

        let result: Result<(), _> =
            bounded(Duration::from_secs(1), "fails", async { Err(StoreError::NotFound) }).await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }
}
