use std::sync::Arc;

use serde_json::json;
use tracing::trace;

use crate::{
    GetEntriesResponse, GetEntryResponse, Result, StatusResponse, SurveyKitError, UpdateEntryResponse,
    model::{SURVEY_REF, SurveyEntry, UpdateEntryRequest},
    store::{DocKey, Filter, Page, Store},
    utils,
};

use super::{settle, settle_status};

/// Append-only store for survey entries: entries are created once and
/// never patched.
pub struct EntryStore {
    store: Arc<Store>,
}

impl EntryStore {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
        }
    }

    /// Creates an entry. The creation timestamp is stamped with server
    /// time at write; a caller-supplied `timestamp` is overwritten. All
    /// other fields pass through verbatim as answer data.
    pub async fn create(
        &self,
        req: &UpdateEntryRequest,
    ) -> UpdateEntryResponse {
        trace!("entries::create(survey={})", req.survey_id);
        settle("entries::create", self.try_create(req).await)
    }

    /// Lists a survey's entries in stored insertion order.
    pub async fn list_by_survey(
        &self,
        survey_id: &str,
    ) -> GetEntriesResponse {
        trace!("entries::list_by_survey({})", survey_id);
        settle("entries::list_by_survey", self.try_list_by_survey(survey_id).await)
    }

    pub async fn get_by_id(
        &self,
        id: &str,
    ) -> GetEntryResponse {
        trace!("entries::get_by_id({})", id);
        settle("entries::get_by_id", self.try_get_by_id(id).await)
    }

    /// Idempotent single-entry delete.
    pub async fn delete_by_id(
        &self,
        id: &str,
    ) -> StatusResponse {
        trace!("entries::delete_by_id({})", id);
        settle_status("entries::delete_by_id", self.try_delete_by_id(id).await)
    }

    async fn try_create(
        &self,
        req: &UpdateEntryRequest,
    ) -> Result<SurveyEntry> {
        let survey_key = DocKey::decode(&req.survey_id)?;
        let mut doc = req.to_document();
        doc.set(SURVEY_REF, survey_key.to_value());
        doc.set("timestamp", json!(utils::time::time_millis()));

        let responses = self.store.responses();
        let key = responses.insert(doc).await?;
        let stored = responses
            .find_by_key(&key)
            .await?
            .ok_or_else(|| SurveyKitError::NotFound(format!("entry {} not found", key)))?;
        SurveyEntry::from_document(stored)
    }

    async fn try_list_by_survey(
        &self,
        survey_id: &str,
    ) -> Result<Vec<SurveyEntry>> {
        let survey_key = DocKey::decode(survey_id)?;
        let filter = Filter::new().eq(SURVEY_REF, survey_key.to_value());
        let docs = self.store.responses().find(&filter, &[], &Page::default()).await?;
        docs.into_iter().map(SurveyEntry::from_document).collect()
    }

    async fn try_get_by_id(
        &self,
        id: &str,
    ) -> Result<SurveyEntry> {
        let key = DocKey::decode(id)?;
        let doc = self
            .store
            .responses()
            .find_by_key(&key)
            .await?
            .ok_or_else(|| SurveyKitError::NotFound(format!("entry {} not found", id)))?;
        SurveyEntry::from_document(doc)
    }

    async fn try_delete_by_id(
        &self,
        id: &str,
    ) -> Result<()> {
        let key = DocKey::decode(id)?;
        self.store.responses().delete(&key).await?;
        Ok(())
    }
}
