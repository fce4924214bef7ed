//! Bounded connection attempts against the search index

use crate::adapters::backend::traits::SearchIndex;
use crate::config::RetryConfig;
use crate::domain::{LoadError, Result};
use crate::log_retry_attempt;
use std::time::Duration;

/// Pings the index until it answers or the retry budget is spent
///
/// Waits with exponential backoff between attempts.
///
/// # Errors
///
/// [`LoadError::IndexConnection`] carrying the last failure once every
/// attempt has failed.
pub async fn connect_with_retry(index: &dyn SearchIndex, retry: &RetryConfig) -> Result<()> {
    let max_attempts = retry.max_retries.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match index.ping().await {
            Ok(()) => {
                tracing::info!(attempt, "Connected to search index");
                return Ok(());
            }
            Err(e) if attempt >= max_attempts => {
                return Err(LoadError::IndexConnection(format!(
                    "giving up after {attempt} attempts: {e}"
                ))
                .into());
            }
            Err(e) => {
                let delay_ms = retry.delay_ms(attempt);
                log_retry_attempt!(attempt, max_attempts, e);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::backend::traits::{BulkWriteResult, IndexDocument};
    use crate::domain::ids::IndexName;
    use crate::domain::TrackliftError;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first `failures` pings
    struct FlakyIndex {
        failures: usize,
        pings: AtomicUsize,
    }

    #[async_trait]
    impl SearchIndex for FlakyIndex {
        async fn ping(&self) -> Result<()> {
            let n = self.pings.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(LoadError::IndexConnection("connection refused".to_string()).into())
            } else {
                Ok(())
            }
        }
        async fn index_exists(&self, _: &IndexName) -> Result<bool> {
            Ok(true)
        }
        async fn create_index(&self, _: &IndexName, _: &Value) -> Result<()> {
            Ok(())
        }
        async fn bulk_index(&self, _: &IndexName, _: &[IndexDocument]) -> Result<BulkWriteResult> {
            Ok(BulkWriteResult::default())
        }
        async fn refresh(&self, _: &IndexName) -> Result<()> {
            Ok(())
        }
        async fn count(&self, _: &IndexName) -> Result<u64> {
            Ok(0)
        }
    }

    fn retry(max_retries: usize) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2.0,
        }
    }

    #[tokio::test]
    async fn test_connect_after_transient_failures() {
        let index = FlakyIndex {
            failures: 2,
            pings: AtomicUsize::new(0),
        };
        connect_with_retry(&index, &retry(3)).await.unwrap();
        assert_eq!(index.pings.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_connect_exhausts_budget() {
        let index = FlakyIndex {
            failures: usize::MAX,
            pings: AtomicUsize::new(0),
        };
        let err = connect_with_retry(&index, &retry(3)).await.unwrap_err();

        assert!(matches!(
            err,
            TrackliftError::Load(LoadError::IndexConnection(_))
        ));
        assert_eq!(index.pings.load(Ordering::SeqCst), 3);
    }
}
