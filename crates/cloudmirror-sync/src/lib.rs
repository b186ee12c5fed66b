//! cloudmirror synchronization engine
//!
//! Mirrors the inventory of a cloud account into the local store, on demand.
//! One trigger runs the vendor's fixed, dependency-ordered sequence of
//! resource-type stages; each stage fans out across the vendor topology
//! (regions, zones, resource groups) with bounded parallelism, records its
//! progress durably and classifies vendor errors so that known-benign
//! provider responses do not abort an otherwise healthy sync.
//!
//! The public surface is small:
//!
//! - [`Syncer::sync`] — fire-and-forget trigger for a full account sync.
//!   Returns immediately; fails fast with [`SyncError::SyncInProgress`] when
//!   another sync holds the account lock. Outcomes are observed through the
//!   durable [`SyncDetail`](cloudmirror_cloud::SyncDetail) records.
//! - [`Syncer::ensure_synced`] — scoped, lock-free resync of a specific set
//!   of cloud IDs, for subsystems that need those resources mirrored now.

pub mod classify;
pub mod config;
pub mod error;
pub mod fanout;
pub mod lock;
pub mod orchestrator;
pub mod recorder;
pub mod stage;
pub mod vendors;

mod ensure;

// Re-exports
pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use lock::{account_lock_key, LeaseId, LeaseLock, LockError, MemoryLeaseLock};
pub use orchestrator::Syncer;
pub use recorder::StatusRecorder;
pub use stage::{Scope, StageSpec};
pub use vendors::Pipeline;
