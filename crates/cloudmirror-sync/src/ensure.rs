//! Conditional resync
//!
//! Some subsystems need a specific set of cloud-identified resources to
//! exist in the mirror right now — e.g. security groups referenced by an
//! incoming request — without paying for a full pipeline run. This path
//! checks presence and synchronizes only the missing subset.
//!
//! It deliberately does not take the account sync lock: it may run
//! concurrently with a full pipeline for the same account, and stays correct
//! because the cloud-operation clients upsert idempotently.

use crate::error::{Result, SyncError};
use crate::orchestrator::Syncer;
use crate::stage::classified_sync;
use cloudmirror_cloud::{ResourceSyncRequest, ResourceType, Vendor};
use std::collections::HashMap;

impl Syncer {
    /// Make sure every cloud ID in `cloud_ids` is mirrored locally, syncing
    /// only the missing ones, and return the cloud-ID → local-ID map.
    ///
    /// IDs that the scoped sync still could not materialize are an error,
    /// not a silently partial map.
    pub async fn ensure_synced(
        &self,
        vendor: Vendor,
        account_id: &str,
        resource: ResourceType,
        cloud_ids: &[String],
    ) -> Result<HashMap<String, String>> {
        let mut found = self
            .inventory
            .find_cloud_ids(vendor, resource, cloud_ids)
            .await?;

        let missing: Vec<String> = cloud_ids
            .iter()
            .filter(|id| !found.contains_key(*id))
            .cloned()
            .collect();
        if missing.is_empty() {
            return Ok(found);
        }

        tracing::info!(
            %vendor,
            account = account_id,
            %resource,
            count = missing.len(),
            "syncing missing cloud resources on demand"
        );

        let ops = self.ops_for(vendor)?;
        let req = ResourceSyncRequest {
            account_id: account_id.to_string(),
            vendor,
            resource,
            partition: None,
            cloud_ids: missing.clone(),
        };
        classified_sync(ops.as_ref(), &req).await?;

        let refreshed = self
            .inventory
            .find_cloud_ids(vendor, resource, &missing)
            .await?;
        found.extend(refreshed);

        let still_missing: Vec<String> = cloud_ids
            .iter()
            .filter(|id| !found.contains_key(*id))
            .cloned()
            .collect();
        if !still_missing.is_empty() {
            return Err(SyncError::CloudIdsNotFound {
                resource,
                ids: still_missing,
            });
        }

        Ok(found)
    }
}
