//! Sync orchestration
//!
//! [`Syncer::sync`] is the public trigger: it decides whether the vendor's
//! shared resources need a refresh, takes the account lock without waiting,
//! then detaches the pipeline into a background task and returns. The caller
//! only ever sees the contention error synchronously; every other outcome
//! lands in the logs and the durable sync-detail records.

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::lock::{account_lock_key, LeaseLock, LockError};
use crate::recorder::StatusRecorder;
use crate::vendors;
use cloudmirror_cloud::{CloudError, CloudOps, InventoryReader, ResourceType, SyncDetailStore, Vendor};
use std::collections::HashMap;
use std::sync::Arc;

/// Entry point of the sync engine. One instance serves all accounts.
pub struct Syncer {
    pub(crate) ops: HashMap<Vendor, Arc<dyn CloudOps>>,
    pub(crate) inventory: Arc<dyn InventoryReader>,
    pub(crate) store: Arc<dyn SyncDetailStore>,
    pub(crate) lock: Arc<dyn LeaseLock>,
    pub(crate) config: SyncConfig,
}

impl Syncer {
    pub fn new(
        inventory: Arc<dyn InventoryReader>,
        store: Arc<dyn SyncDetailStore>,
        lock: Arc<dyn LeaseLock>,
        config: SyncConfig,
    ) -> Self {
        Self {
            ops: HashMap::new(),
            inventory,
            store,
            lock,
            config,
        }
    }

    /// Register the cloud-operation client for a vendor.
    pub fn with_ops(mut self, vendor: Vendor, ops: Arc<dyn CloudOps>) -> Self {
        self.ops.insert(vendor, ops);
        self
    }

    pub(crate) fn ops_for(&self, vendor: Vendor) -> Result<Arc<dyn CloudOps>> {
        self.ops
            .get(&vendor)
            .cloned()
            .ok_or(SyncError::UnsupportedVendor(vendor))
    }

    /// Trigger a full account sync. Fire-and-forget: on success the pipeline
    /// runs detached and this returns immediately.
    ///
    /// Fails fast with [`SyncError::SyncInProgress`] when another sync holds
    /// the account lock. Callers that need the outcome poll the sync-detail
    /// records out of band.
    pub async fn sync(&self, account_id: &str, vendor: Vendor) -> Result<()> {
        let ops = self.ops_for(vendor)?;

        let sync_public = self.need_public_resource_sync(vendor).await.map_err(|err| {
            tracing::error!(%vendor, account = account_id, %err, "public resource check failed");
            err
        })?;

        let lease = match self
            .lock
            .try_lock(&account_lock_key(account_id), self.config.lock_ttl)
            .await
        {
            Ok(lease) => lease,
            Err(LockError::AlreadyHeld) => return Err(SyncError::SyncInProgress),
            Err(err) => return Err(err.into()),
        };

        let pipeline = vendors::pipeline(vendor);
        let inventory = Arc::clone(&self.inventory);
        let recorder = StatusRecorder::new(Arc::clone(&self.store));
        let lock = Arc::clone(&self.lock);
        let config = self.config.clone();
        let account = account_id.to_string();

        tokio::spawn(async move {
            if let Err(err) = pipeline
                .run_all(&account, sync_public, &ops, &inventory, &recorder, &config)
                .await
            {
                tracing::error!(%vendor, account = %account, %err, "account sync failed");
            }

            match lock.unlock(lease).await {
                Ok(()) => {}
                // The TTL already reclaimed the lease; nothing to release.
                Err(LockError::LeaseNotFound) => {
                    tracing::debug!(account = %account, lease, "sync lock already expired");
                }
                Err(err) => {
                    tracing::error!(account = %account, lease, %err, "failed to release sync lock");
                }
            }
        });

        Ok(())
    }

    /// Empty-store heuristic: refresh the vendor's shared resources when the
    /// mirror has no regions, zones or images for it at all. Not a staleness
    /// check. Vendors without a given topology level count as present.
    async fn need_public_resource_sync(&self, vendor: Vendor) -> std::result::Result<bool, CloudError> {
        if vendor.has_regions() {
            let regions = self
                .inventory
                .count_resource(vendor, ResourceType::Region)
                .await?;
            if regions == 0 {
                return Ok(true);
            }
        }

        if vendor.has_zones() {
            let zones = self
                .inventory
                .count_resource(vendor, ResourceType::Zone)
                .await?;
            if zones == 0 {
                return Ok(true);
            }
        }

        if vendor.has_images() {
            let images = self
                .inventory
                .count_resource(vendor, ResourceType::Image)
                .await?;
            if images == 0 {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
