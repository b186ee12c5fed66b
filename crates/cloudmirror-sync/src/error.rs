//! Sync engine error types

use crate::lock::LockError;
use cloudmirror_cloud::{CloudError, ResourceType, Vendor};
use thiserror::Error;

/// Errors surfaced by the sync engine.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Another sync already holds the account lock. Returned synchronously
    /// to the triggering caller; never retried by the engine.
    #[error("synchronization is in progress")]
    SyncInProgress,

    #[error("vendor {0} is not supported")]
    UnsupportedVendor(Vendor),

    /// A resource-type stage failed and halted the pipeline. `resource`
    /// names the failing stage.
    #[error("sync stage {resource} failed: {source}")]
    Stage {
        resource: ResourceType,
        source: CloudError,
    },

    /// Conditional resync could not make the requested cloud IDs appear in
    /// the mirror.
    #[error("{resource} cloud ids still missing after sync: {ids:?}")]
    CloudIdsNotFound {
        resource: ResourceType,
        ids: Vec<String>,
    },

    #[error("lock error: {0}")]
    Lock(#[from] LockError),

    #[error(transparent)]
    Cloud(#[from] CloudError),
}

impl SyncError {
    /// The resource type of the failing stage, when this error came out of a
    /// pipeline run.
    pub fn failed_resource(&self) -> Option<ResourceType> {
        match self {
            SyncError::Stage { resource, .. } => Some(*resource),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
