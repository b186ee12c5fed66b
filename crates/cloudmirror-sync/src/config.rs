//! Engine configuration

use std::time::Duration;

/// Tunables for one [`Syncer`](crate::Syncer) instance.
///
/// Both values are deliberately per-instance rather than process-wide so that
/// deployments and tests can tune them independently.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum number of in-flight cloud calls within a single stage's
    /// fan-out.
    pub fan_out_concurrency: usize,

    /// TTL of the account sync lease. Must exceed the worst-case pipeline
    /// duration: nothing extends the lease mid-run, so an overrunning
    /// pipeline loses the lock while it keeps running and a second sync for
    /// the same account may start concurrently. Known, accepted risk.
    pub lock_ttl: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fan_out_concurrency: 10,
            lock_ttl: Duration::from_secs(2 * 60 * 60),
        }
    }
}
