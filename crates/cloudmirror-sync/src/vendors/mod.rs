//! Per-vendor pipelines
//!
//! Each vendor module holds two static stage tables: the shared/public
//! resources (region, zone, image) that must exist before partition keys can
//! be resolved, and the account resources in their fixed dependency order.
//! The order is a correctness constraint, not a style choice — security
//! groups must be mirrored before the compute instances that reference them,
//! VPCs before their subnets — so it lives in auditable data and is asserted
//! by tests.

mod aws;
mod azure;
mod gcp;
mod huawei;
mod other;
mod tcloud;

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::recorder::StatusRecorder;
use crate::stage::{run_stage, StageSpec};
use cloudmirror_cloud::{CloudOps, InventoryReader, Vendor};
use std::sync::Arc;

/// The fixed stage sequence for one vendor.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    vendor: Vendor,
    public_stages: &'static [StageSpec],
    stages: &'static [StageSpec],
}

/// Look up the pipeline for a vendor.
pub fn pipeline(vendor: Vendor) -> Pipeline {
    let (public_stages, stages) = match vendor {
        Vendor::TCloud => (tcloud::PUBLIC_STAGES, tcloud::STAGES),
        Vendor::Aws => (aws::PUBLIC_STAGES, aws::STAGES),
        Vendor::HuaWei => (huawei::PUBLIC_STAGES, huawei::STAGES),
        Vendor::Gcp => (gcp::PUBLIC_STAGES, gcp::STAGES),
        Vendor::Azure => (azure::PUBLIC_STAGES, azure::STAGES),
        Vendor::Other => (other::PUBLIC_STAGES, other::STAGES),
    };
    Pipeline {
        vendor,
        public_stages,
        stages,
    }
}

impl Pipeline {
    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// Region/zone/image pre-stages, run only when the public-resource check
    /// found an empty mirror.
    pub fn public_stages(&self) -> &'static [StageSpec] {
        self.public_stages
    }

    /// Account-resource stages in execution order.
    pub fn stages(&self) -> &'static [StageSpec] {
        self.stages
    }

    /// Run every stage in order, stopping at the first failure.
    ///
    /// Stages after a failing one are never attempted; their status records
    /// keep whatever state a previous run left (possibly none). The error
    /// names the failing resource type.
    pub async fn run_all(
        &self,
        account_id: &str,
        sync_public: bool,
        ops: &Arc<dyn CloudOps>,
        inventory: &Arc<dyn InventoryReader>,
        recorder: &StatusRecorder,
        config: &SyncConfig,
    ) -> Result<(), SyncError> {
        if sync_public {
            tracing::info!(vendor = %self.vendor, account = account_id, "syncing public resources");
            self.run_stages(self.public_stages, account_id, ops, inventory, recorder, config)
                .await?;
        }

        self.run_stages(self.stages, account_id, ops, inventory, recorder, config)
            .await
    }

    async fn run_stages(
        &self,
        stages: &[StageSpec],
        account_id: &str,
        ops: &Arc<dyn CloudOps>,
        inventory: &Arc<dyn InventoryReader>,
        recorder: &StatusRecorder,
        config: &SyncConfig,
    ) -> Result<(), SyncError> {
        for stage in stages {
            run_stage(*stage, self.vendor, account_id, ops, inventory, recorder, config)
                .await
                .map_err(|source| SyncError::Stage {
                    resource: stage.resource,
                    source,
                })?;
        }
        Ok(())
    }
}
