//! Resource-type sync stages
//!
//! A stage is one resource type's synchronization within a vendor pipeline:
//! mark the status record `Syncing`, fan the cloud calls out over the
//! vendor's topology with every result passed through the error classifier,
//! then mark `Success` or `Failed` and hand the stage error to the pipeline.

use crate::classify::classify;
use crate::config::SyncConfig;
use crate::fanout::run_bounded;
use crate::recorder::StatusRecorder;
use cloudmirror_cloud::{
    CloudError, CloudOps, InventoryReader, Partition, ResourceSyncRequest, ResourceType, Vendor,
};
use std::sync::Arc;

/// How a stage's work is partitioned across the vendor topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One unpartitioned call (global resources).
    Global,
    PerRegion,
    PerZone,
    PerResourceGroup,
}

/// Static descriptor of one stage: the resource type and its partitioning.
///
/// Pipelines are plain ordered slices of these, so per-vendor ordering stays
/// auditable data rather than control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
    pub resource: ResourceType,
    pub scope: Scope,
}

impl StageSpec {
    pub const fn new(resource: ResourceType, scope: Scope) -> Self {
        Self { resource, scope }
    }
}

/// One cloud call with the vendor's benign errors suppressed.
pub(crate) async fn classified_sync(
    ops: &dyn CloudOps,
    req: &ResourceSyncRequest,
) -> Result<(), CloudError> {
    match ops.sync_resource(req).await {
        Ok(()) => Ok(()),
        Err(err) => match classify(req.vendor, err) {
            None => Ok(()),
            Some(err) => Err(err),
        },
    }
}

/// Run one stage to completion, updating the status record on both ends.
pub(crate) async fn run_stage(
    stage: StageSpec,
    vendor: Vendor,
    account_id: &str,
    ops: &Arc<dyn CloudOps>,
    inventory: &Arc<dyn InventoryReader>,
    recorder: &StatusRecorder,
    config: &SyncConfig,
) -> Result<(), CloudError> {
    recorder
        .mark_syncing(account_id, vendor, stage.resource)
        .await?;

    let outcome = sync_partitions(stage, vendor, account_id, ops, inventory, config).await;

    match outcome {
        Ok(()) => {
            recorder
                .mark_success(account_id, vendor, stage.resource)
                .await?;
            tracing::debug!(%vendor, account = account_id, resource = %stage.resource, "stage synced");
            Ok(())
        }
        Err(err) => {
            recorder
                .mark_failed(account_id, vendor, stage.resource, &err)
                .await?;
            Err(err)
        }
    }
}

async fn sync_partitions(
    stage: StageSpec,
    vendor: Vendor,
    account_id: &str,
    ops: &Arc<dyn CloudOps>,
    inventory: &Arc<dyn InventoryReader>,
    config: &SyncConfig,
) -> Result<(), CloudError> {
    if stage.scope == Scope::Global {
        let req = ResourceSyncRequest {
            account_id: account_id.to_string(),
            vendor,
            resource: stage.resource,
            partition: None,
            cloud_ids: Vec::new(),
        };
        return classified_sync(ops.as_ref(), &req).await;
    }

    let partitions = resolve_partitions(stage.scope, vendor, account_id, inventory).await?;

    let ops = Arc::clone(ops);
    let account = account_id.to_string();
    let resource = stage.resource;
    run_bounded(config.fan_out_concurrency, partitions, move |partition| {
        let ops = Arc::clone(&ops);
        let account = account.clone();
        async move {
            let req = ResourceSyncRequest {
                account_id: account,
                vendor,
                resource,
                partition: Some(partition),
                cloud_ids: Vec::new(),
            };
            classified_sync(ops.as_ref(), &req).await
        }
    })
    .await
}

async fn resolve_partitions(
    scope: Scope,
    vendor: Vendor,
    account_id: &str,
    inventory: &Arc<dyn InventoryReader>,
) -> Result<Vec<Partition>, CloudError> {
    let partitions = match scope {
        Scope::Global => Vec::new(),
        Scope::PerRegion => inventory
            .list_regions(vendor, account_id)
            .await?
            .into_iter()
            .map(Partition::Region)
            .collect(),
        Scope::PerZone => inventory
            .list_zones(vendor, account_id)
            .await?
            .into_iter()
            .map(Partition::Zone)
            .collect(),
        Scope::PerResourceGroup => inventory
            .list_resource_groups(account_id)
            .await?
            .into_iter()
            .map(Partition::ResourceGroup)
            .collect(),
    };
    Ok(partitions)
}
