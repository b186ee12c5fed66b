//! Bounded fan-out executor
//!
//! Runs a per-partition sync operation over a set of partition keys with a
//! fixed concurrency ceiling, waits for every partition to finish and returns
//! the first error observed in completion order.
//!
//! Two deliberate properties, relied on by the stage runner:
//!
//! - No cancellation: once dispatched, every partition runs to completion
//!   even after the first error is known.
//! - Partial success is discarded: one failing partition fails the whole
//!   stage, regardless of how many others succeeded.

use cloudmirror_cloud::{CloudError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Run `op` for every item with at most `concurrency` in flight.
///
/// The returned error is the first failure in completion order, which for
/// concurrent partitions is not necessarily the first one dispatched. Task
/// panics are reported as [`CloudError::Internal`].
pub async fn run_bounded<T, F, Fut>(concurrency: usize, items: Vec<T>, op: F) -> Result<()>
where
    T: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    if items.is_empty() {
        return Ok(());
    }

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();
    for item in items {
        let semaphore = Arc::clone(&semaphore);
        let fut = op(item);
        tasks.spawn(async move {
            // The semaphore is never closed while tasks hold it.
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| CloudError::Internal(e.to_string()))?;
            fut.await
        });
    }

    let mut first_err: Option<CloudError> = None;
    while let Some(joined) = tasks.join_next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => Err(CloudError::Internal(format!("sync task panicked: {}", e))),
        };
        if let Err(err) = outcome {
            if first_err.is_none() {
                first_err = Some(err);
            }
        }
    }

    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn empty_input_is_a_no_op() {
        let result = run_bounded(10, Vec::<String>::new(), |_| async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_ceiling() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let items: Vec<usize> = (0..30).collect();

        let result = run_bounded(4, items, |_| {
            let in_flight = Arc::clone(&in_flight);
            let max_seen = Arc::clone(&max_seen);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                sleep(Duration::from_millis(10)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

        assert!(result.is_ok());
        assert!(max_seen.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn first_error_in_completion_order_wins() {
        // The slow failure is dispatched first but completes last.
        let items = vec![("slow", 80u64), ("fast", 5u64)];
        let result = run_bounded(10, items, |(name, delay)| async move {
            sleep(Duration::from_millis(delay)).await;
            Err(CloudError::api(format!("{} failed", name)))
        })
        .await;

        match result {
            Err(CloudError::Api { message, .. }) => assert_eq!(message, "fast failed"),
            other => panic!("expected fast error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn all_partitions_run_to_completion_after_an_error() {
        let completed = Arc::new(AtomicUsize::new(0));
        let items: Vec<usize> = (0..8).collect();

        let result = run_bounded(2, items, |i| {
            let completed = Arc::clone(&completed);
            async move {
                sleep(Duration::from_millis(5)).await;
                completed.fetch_add(1, Ordering::SeqCst);
                if i == 0 {
                    Err(CloudError::api("partition 0 failed"))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(completed.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn zero_ceiling_is_clamped_to_one() {
        let items: Vec<usize> = (0..3).collect();
        let result = run_bounded(0, items, |_| async { Ok(()) }).await;
        assert!(result.is_ok());
    }
}
