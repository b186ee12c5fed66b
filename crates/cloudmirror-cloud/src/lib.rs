//! Cloud vendor model for cloudmirror
//!
//! This crate defines the shared vocabulary of the cloudmirror sync engine:
//! which vendors exist, which resource types are mirrored, how per-resource
//! sync progress is recorded, and the trait seams behind which the actual
//! vendor SDK calls, the local inventory mirror, and the sync-detail store
//! live. The engine in `cloudmirror-sync` is written entirely against these
//! traits.

pub mod client;
pub mod detail;
pub mod error;
pub mod vendor;

// Re-exports
pub use client::{CloudOps, InventoryReader, Partition, ResourceSyncRequest, SyncDetailStore};
pub use detail::{SyncDetail, SyncState};
pub use error::{CloudError, Result};
pub use vendor::{ResourceType, Vendor};
