//! Collaborator traits consumed by the sync engine
//!
//! Three seams, all implemented outside this workspace: the cloud-operation
//! client that performs the actual vendor API round-trips, the read side of
//! the local inventory mirror, and the sync-detail persistence client. The
//! engine treats all of them as opaque, possibly-slow, possibly-failing
//! remote services.

use crate::detail::SyncDetail;
use crate::error::Result;
use crate::vendor::{ResourceType, Vendor};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One partition of a resource-type sync: the slice of the vendor topology a
/// single cloud call covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum Partition {
    Region(String),
    Zone(String),
    ResourceGroup(String),
}

impl Partition {
    pub fn name(&self) -> &str {
        match self {
            Partition::Region(name) | Partition::Zone(name) | Partition::ResourceGroup(name) => {
                name
            }
        }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Partition::Region(name) => write!(f, "region:{}", name),
            Partition::Zone(name) => write!(f, "zone:{}", name),
            Partition::ResourceGroup(name) => write!(f, "resource-group:{}", name),
        }
    }
}

/// Request for one cloud-operation sync call.
///
/// `partition` is `None` for globally-scoped resources. A non-empty
/// `cloud_ids` narrows the call to those specific cloud resources (used by
/// the conditional resync path); empty means "everything in scope".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSyncRequest {
    pub account_id: String,
    pub vendor: Vendor,
    pub resource: ResourceType,
    pub partition: Option<Partition>,
    pub cloud_ids: Vec<String>,
}

/// Cloud-operation client for one vendor.
///
/// Implementations map the request onto the vendor SDK, diff the response
/// against the mirror and upsert the result. They must be idempotent: the
/// conditional resync path calls them concurrently with full pipeline runs.
#[async_trait]
pub trait CloudOps: Send + Sync {
    async fn sync_resource(&self, req: &ResourceSyncRequest) -> Result<()>;
}

/// Read-only queries against the local inventory mirror.
#[async_trait]
pub trait InventoryReader: Send + Sync {
    /// Count mirrored rows of `resource` for the vendor, across all accounts.
    async fn count_resource(&self, vendor: Vendor, resource: ResourceType) -> Result<u64>;

    /// Region identifiers the account's stages should fan out over.
    async fn list_regions(&self, vendor: Vendor, account_id: &str) -> Result<Vec<String>>;

    /// Zone identifiers for vendors that partition by zone.
    async fn list_zones(&self, vendor: Vendor, account_id: &str) -> Result<Vec<String>>;

    /// Azure resource-group names owned by the account.
    async fn list_resource_groups(&self, account_id: &str) -> Result<Vec<String>>;

    /// Map each already-mirrored cloud ID to its local ID. Missing IDs are
    /// simply absent from the returned map.
    async fn find_cloud_ids(
        &self,
        vendor: Vendor,
        resource: ResourceType,
        cloud_ids: &[String],
    ) -> Result<HashMap<String, String>>;
}

/// Persistence client for `SyncDetail` records.
#[async_trait]
pub trait SyncDetailStore: Send + Sync {
    async fn get(
        &self,
        account_id: &str,
        vendor: Vendor,
        resource: ResourceType,
    ) -> Result<Option<SyncDetail>>;

    async fn create(&self, detail: &SyncDetail) -> Result<()>;

    async fn update(&self, detail: &SyncDetail) -> Result<()>;
}
