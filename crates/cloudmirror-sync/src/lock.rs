//! Account sync lock
//!
//! At most one synchronization may be in flight per account across the whole
//! deployment. The engine depends only on the [`LeaseLock`] trait, whose
//! contract mirrors a lease-based coordination service: a non-blocking
//! try-acquire that issues a TTL-bounded lease, and a release that reports
//! [`LockError::LeaseNotFound`] once the service has already reclaimed the
//! lease. Callers must treat that release outcome as a benign race.
//!
//! [`MemoryLeaseLock`] is the in-tree backend for single-node deployments
//! and tests; multi-node deployments bind an external lease service behind
//! the same trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

/// Opaque handle for one held lease.
pub type LeaseId = i64;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LockError {
    /// The key is already locked. Try-lock never waits.
    #[error("lock already held")]
    AlreadyHeld,

    /// The lease expired and was reclaimed before the release. Benign on
    /// unlock.
    #[error("requested lease not found")]
    LeaseNotFound,

    #[error("lock backend error: {0}")]
    Backend(String),
}

/// Lease-based distributed mutual exclusion.
#[async_trait]
pub trait LeaseLock: Send + Sync {
    /// Acquire `key` with a lease of `ttl`, failing immediately with
    /// [`LockError::AlreadyHeld`] if the key is locked.
    async fn try_lock(&self, key: &str, ttl: Duration) -> Result<LeaseId, LockError>;

    /// Release a held lease. Returns [`LockError::LeaseNotFound`] when the
    /// TTL already reclaimed it.
    async fn unlock(&self, lease: LeaseId) -> Result<(), LockError>;
}

/// Lock key for an account's sync.
pub fn account_lock_key(account_id: &str) -> String {
    format!("account-sync/{}", account_id)
}

#[derive(Debug)]
struct Lease {
    key: String,
    expires_at: Instant,
}

#[derive(Default)]
struct LockTable {
    next_lease: LeaseId,
    /// key -> lease currently holding it
    held: HashMap<String, LeaseId>,
    leases: HashMap<LeaseId, Lease>,
}

impl LockTable {
    /// Drop the holder of `key` if its lease has expired. Expiry is lazy:
    /// nothing sweeps in the background, reclamation happens on the next
    /// acquire or release touching the key.
    fn reclaim_expired(&mut self, key: &str, now: Instant) {
        if let Some(lease_id) = self.held.get(key).copied() {
            let expired = self
                .leases
                .get(&lease_id)
                .map(|l| l.expires_at <= now)
                .unwrap_or(true);
            if expired {
                self.held.remove(key);
                self.leases.remove(&lease_id);
            }
        }
    }
}

/// In-memory lease lock with lazy TTL expiry.
#[derive(Default)]
pub struct MemoryLeaseLock {
    table: Mutex<LockTable>,
}

impl MemoryLeaseLock {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaseLock for MemoryLeaseLock {
    async fn try_lock(&self, key: &str, ttl: Duration) -> Result<LeaseId, LockError> {
        let now = Instant::now();
        let mut table = self.table.lock().await;
        table.reclaim_expired(key, now);

        if table.held.contains_key(key) {
            return Err(LockError::AlreadyHeld);
        }

        table.next_lease += 1;
        let lease_id = table.next_lease;
        table.held.insert(key.to_string(), lease_id);
        table.leases.insert(
            lease_id,
            Lease {
                key: key.to_string(),
                expires_at: now + ttl,
            },
        );
        tracing::debug!(key, lease = lease_id, "acquired sync lock");
        Ok(lease_id)
    }

    async fn unlock(&self, lease: LeaseId) -> Result<(), LockError> {
        let now = Instant::now();
        let mut table = self.table.lock().await;

        let Some(entry) = table.leases.remove(&lease) else {
            return Err(LockError::LeaseNotFound);
        };
        if table.held.get(&entry.key) == Some(&lease) {
            table.held.remove(&entry.key);
        }
        if entry.expires_at <= now {
            // The TTL already reclaimed this lease.
            return Err(LockError::LeaseNotFound);
        }
        tracing::debug!(key = %entry.key, lease, "released sync lock");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const TTL: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn second_acquire_fails_without_waiting() {
        let lock = MemoryLeaseLock::new();
        let key = account_lock_key("acc-1");

        let lease = lock.try_lock(&key, TTL).await.unwrap();
        assert_eq!(lock.try_lock(&key, TTL).await, Err(LockError::AlreadyHeld));

        lock.unlock(lease).await.unwrap();
        lock.try_lock(&key, TTL).await.unwrap();
    }

    #[tokio::test]
    async fn different_accounts_do_not_contend() {
        let lock = MemoryLeaseLock::new();
        lock.try_lock(&account_lock_key("acc-1"), TTL).await.unwrap();
        lock.try_lock(&account_lock_key("acc-2"), TTL).await.unwrap();
    }

    #[tokio::test]
    async fn unlock_within_ttl_succeeds() {
        // Lock TTL 5s, work takes well under that: normal release.
        let lock = MemoryLeaseLock::new();
        let lease = lock.try_lock("k", TTL).await.unwrap();
        sleep(Duration::from_millis(20)).await;
        assert_eq!(lock.unlock(lease).await, Ok(()));
    }

    #[tokio::test]
    async fn expired_lease_is_reclaimed_and_unlock_reports_not_found() {
        // Lock TTL far shorter than the work: the key is reclaimed mid-run
        // and the eventual unlock sees "lease not found".
        let lock = MemoryLeaseLock::new();
        let ttl = Duration::from_millis(30);
        let lease = lock.try_lock("k", ttl).await.unwrap();

        sleep(Duration::from_millis(60)).await;

        // Reclaimed: a second holder can acquire while the first still runs.
        let second = lock.try_lock("k", TTL).await.unwrap();

        assert_eq!(lock.unlock(lease).await, Err(LockError::LeaseNotFound));
        // The stale unlock must not have released the new holder.
        assert_eq!(lock.try_lock("k", TTL).await, Err(LockError::AlreadyHeld));
        lock.unlock(second).await.unwrap();
    }

    #[tokio::test]
    async fn double_unlock_reports_not_found() {
        let lock = MemoryLeaseLock::new();
        let lease = lock.try_lock("k", TTL).await.unwrap();
        lock.unlock(lease).await.unwrap();
        assert_eq!(lock.unlock(lease).await, Err(LockError::LeaseNotFound));
    }
}
