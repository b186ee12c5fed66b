//! Durable sync status recording
//!
//! Thin wrapper over the [`SyncDetailStore`] collaborator that enforces the
//! one-record-per-key invariant: every write queries first and then creates
//! or updates, never blindly inserts.

use cloudmirror_cloud::{
    CloudError, ResourceType, SyncDetail, SyncDetailStore, SyncState, Vendor,
};
use std::sync::Arc;

/// Records per-resource-type sync progress for an account.
#[derive(Clone)]
pub struct StatusRecorder {
    store: Arc<dyn SyncDetailStore>,
}

impl StatusRecorder {
    pub fn new(store: Arc<dyn SyncDetailStore>) -> Self {
        Self { store }
    }

    /// Mark the stage as started.
    pub async fn mark_syncing(
        &self,
        account_id: &str,
        vendor: Vendor,
        resource: ResourceType,
    ) -> Result<(), CloudError> {
        self.upsert(account_id, vendor, resource, SyncState::Syncing, None)
            .await
    }

    /// Mark the stage as finished successfully.
    pub async fn mark_success(
        &self,
        account_id: &str,
        vendor: Vendor,
        resource: ResourceType,
    ) -> Result<(), CloudError> {
        self.upsert(account_id, vendor, resource, SyncState::Success, None)
            .await
    }

    /// Mark the stage as failed, persisting the classified error as the
    /// failure reason.
    pub async fn mark_failed(
        &self,
        account_id: &str,
        vendor: Vendor,
        resource: ResourceType,
        err: &CloudError,
    ) -> Result<(), CloudError> {
        self.upsert(
            account_id,
            vendor,
            resource,
            SyncState::Failed,
            Some(err.failure_reason()),
        )
        .await
    }

    async fn upsert(
        &self,
        account_id: &str,
        vendor: Vendor,
        resource: ResourceType,
        state: SyncState,
        reason: Option<String>,
    ) -> Result<(), CloudError> {
        let existing = self.store.get(account_id, vendor, resource).await?;

        let mut detail = match existing {
            Some(detail) => detail,
            None => {
                let detail = SyncDetail::syncing(account_id, vendor, resource);
                self.store.create(&detail).await?;
                detail
            }
        };

        match state {
            SyncState::Syncing => {
                detail.state = SyncState::Syncing;
                detail.ended_at = None;
                detail.failure_reason = None;
            }
            SyncState::Success => detail.finish_success(),
            SyncState::Failed => {
                detail.finish_failed(reason.unwrap_or_default());
            }
        }

        self.store.update(&detail).await?;
        tracing::debug!(
            account = account_id,
            %vendor,
            %resource,
            state = %detail.state,
            "recorded sync detail"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    type Key = (String, Vendor, ResourceType);

    /// In-memory SyncDetailStore that counts creates, to assert the
    /// query-then-upsert invariant.
    #[derive(Default)]
    struct MemStore {
        rows: Mutex<HashMap<Key, SyncDetail>>,
        creates: Mutex<usize>,
    }

    #[async_trait]
    impl SyncDetailStore for MemStore {
        async fn get(
            &self,
            account_id: &str,
            vendor: Vendor,
            resource: ResourceType,
        ) -> Result<Option<SyncDetail>, CloudError> {
            let rows = self.rows.lock().await;
            Ok(rows
                .get(&(account_id.to_string(), vendor, resource))
                .cloned())
        }

        async fn create(&self, detail: &SyncDetail) -> Result<(), CloudError> {
            *self.creates.lock().await += 1;
            let mut rows = self.rows.lock().await;
            rows.insert(
                (detail.account_id.clone(), detail.vendor, detail.resource),
                detail.clone(),
            );
            Ok(())
        }

        async fn update(&self, detail: &SyncDetail) -> Result<(), CloudError> {
            let mut rows = self.rows.lock().await;
            rows.insert(
                (detail.account_id.clone(), detail.vendor, detail.resource),
                detail.clone(),
            );
            Ok(())
        }
    }

    #[tokio::test]
    async fn repeated_marks_keep_a_single_record() {
        let store = Arc::new(MemStore::default());
        let recorder = StatusRecorder::new(store.clone());

        recorder
            .mark_syncing("acc-1", Vendor::TCloud, ResourceType::Disk)
            .await
            .unwrap();
        recorder
            .mark_success("acc-1", Vendor::TCloud, ResourceType::Disk)
            .await
            .unwrap();
        recorder
            .mark_syncing("acc-1", Vendor::TCloud, ResourceType::Disk)
            .await
            .unwrap();

        assert_eq!(*store.creates.lock().await, 1);
        assert_eq!(store.rows.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn failure_reason_is_persisted_and_cleared() {
        let store = Arc::new(MemStore::default());
        let recorder = StatusRecorder::new(store.clone());

        let err = CloudError::api("DescribeDisks failed: region unavailable");
        recorder
            .mark_failed("acc-1", Vendor::Aws, ResourceType::Disk, &err)
            .await
            .unwrap();

        let detail = store
            .get("acc-1", Vendor::Aws, ResourceType::Disk)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.state, SyncState::Failed);
        assert!(detail
            .failure_reason
            .as_deref()
            .unwrap()
            .contains("region unavailable"));
        assert!(detail.ended_at.is_some());

        recorder
            .mark_success("acc-1", Vendor::Aws, ResourceType::Disk)
            .await
            .unwrap();
        let detail = store
            .get("acc-1", Vendor::Aws, ResourceType::Disk)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.state, SyncState::Success);
        assert!(detail.failure_reason.is_none());
    }
}
