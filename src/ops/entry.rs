use std::sync::Arc;

use async_trait::async_trait;

use crate::{GetEntriesResponse, GetEntryResponse, StatusResponse, UpdateEntryResponse, model::UpdateEntryRequest, stores::EntryStore};

/// Result listener for entry use-cases.
#[async_trait]
pub trait EntryOpsListener: Send + Sync {
    async fn on_entry_created(
        &self,
        resp: UpdateEntryResponse,
    );

    async fn on_entries_fetched(
        &self,
        resp: GetEntriesResponse,
    );

    async fn on_entry_fetched(
        &self,
        resp: GetEntryResponse,
    );

    async fn on_entry_deleted(
        &self,
        resp: StatusResponse,
    );
}

/// Entry use-case orchestrator.
pub struct EntryOps {
    entries: Arc<EntryStore>,
}

impl EntryOps {
    pub fn new(entries: Arc<EntryStore>) -> Self {
        Self {
            entries,
        }
    }

    pub async fn update_entry(
        &self,
        req: &UpdateEntryRequest,
        listener: &dyn EntryOpsListener,
    ) {
        listener.on_entry_created(self.entries.create(req).await).await;
    }

    pub async fn get_entries_by_survey(
        &self,
        survey_id: &str,
        listener: &dyn EntryOpsListener,
    ) {
        listener.on_entries_fetched(self.entries.list_by_survey(survey_id).await).await;
    }

    pub async fn get_entry_by_id(
        &self,
        id: &str,
        listener: &dyn EntryOpsListener,
    ) {
        listener.on_entry_fetched(self.entries.get_by_id(id).await).await;
    }

    pub async fn delete_entry_by_id(
        &self,
        id: &str,
        listener: &dyn EntryOpsListener,
    ) {
        listener.on_entry_deleted(self.entries.delete_by_id(id).await).await;
    }
}
