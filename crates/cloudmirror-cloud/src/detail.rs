//! Durable per-resource-type sync progress records
//!
//! One `SyncDetail` row exists per `(account, vendor, resource type)`. The
//! engine flips it to `Syncing` when a stage starts and to `Success` or
//! `Failed` when the stage's fan-out has drained.

use crate::vendor::{ResourceType, Vendor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome state of one resource-type sync stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Syncing,
    Success,
    Failed,
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncState::Syncing => write!(f, "syncing"),
            SyncState::Success => write!(f, "success"),
            SyncState::Failed => write!(f, "failed"),
        }
    }
}

/// Persisted progress record for one resource type of one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncDetail {
    pub account_id: String,
    pub vendor: Vendor,
    pub resource: ResourceType,
    pub state: SyncState,

    /// Set when the stage reaches `Success` or `Failed`; `None` while syncing.
    pub ended_at: Option<DateTime<Utc>>,

    /// Only set on `Failed`. Free text or a serialized structured error.
    pub failure_reason: Option<String>,
}

impl SyncDetail {
    /// A fresh record in the `Syncing` state.
    pub fn syncing(
        account_id: impl Into<String>,
        vendor: Vendor,
        resource: ResourceType,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            vendor,
            resource,
            state: SyncState::Syncing,
            ended_at: None,
            failure_reason: None,
        }
    }

    /// Flip to `Success`, stamping the end time and clearing any stale
    /// failure reason from a previous run.
    pub fn finish_success(&mut self) {
        self.state = SyncState::Success;
        self.ended_at = Some(Utc::now());
        self.failure_reason = None;
    }

    /// Flip to `Failed` with the recorded reason.
    pub fn finish_failed(&mut self, reason: impl Into<String>) {
        self.state = SyncState::Failed;
        self.ended_at = Some(Utc::now());
        self.failure_reason = Some(reason.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_clears_previous_failure() {
        let mut detail = SyncDetail::syncing("acc-1", Vendor::TCloud, ResourceType::Disk);
        detail.finish_failed("region gone");
        assert_eq!(detail.state, SyncState::Failed);
        assert!(detail.failure_reason.is_some());

        detail.finish_success();
        assert_eq!(detail.state, SyncState::Success);
        assert!(detail.failure_reason.is_none());
        assert!(detail.ended_at.is_some());
    }
}
