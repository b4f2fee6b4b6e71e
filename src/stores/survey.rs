use std::sync::Arc;

use tracing::trace;

use crate::{
    GetSurveyResponse, GetSurveysResponse, Result, StatusResponse, SurveyKitError, UpdateSurveyResponse,
    model::{GetSurveysRequest, Survey, UpdateSurveyRequest},
    store::{DocKey, Filter, Page, SortSpec, Store},
};

use super::{settle, settle_status};

/// CRUD operations for surveys.
pub struct SurveyStore {
    store: Arc<Store>,
}

impl SurveyStore {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
        }
    }

    /// Create-or-patch: a request without an id inserts a new survey, a
    /// request with an id merges only the supplied fields. The response
    /// always reflects the authoritative stored state from a re-read, so
    /// a patch against an unknown id surfaces as `NotFound`.
    pub async fn update(
        &self,
        req: &UpdateSurveyRequest,
    ) -> UpdateSurveyResponse {
        trace!("surveys::update({:?})", req.id);
        settle("surveys::update", self.try_update(req).await)
    }

    pub async fn get(
        &self,
        id: &str,
    ) -> GetSurveyResponse {
        trace!("surveys::get({})", id);
        settle("surveys::get", self.try_get(id).await)
    }

    /// Lists all surveys sorted ascending by `title`, with an optional
    /// skip/take window.
    pub async fn list(
        &self,
        req: &GetSurveysRequest,
    ) -> GetSurveysResponse {
        trace!("surveys::list(offset={:?}, limit={:?})", req.offset, req.limit);
        settle("surveys::list", self.try_list(req).await)
    }

    /// Idempotent delete: succeeds whether or not the survey existed.
    pub async fn delete(
        &self,
        id: &str,
    ) -> StatusResponse {
        trace!("surveys::delete({})", id);
        settle_status("surveys::delete", self.try_delete(id).await)
    }

    async fn try_update(
        &self,
        req: &UpdateSurveyRequest,
    ) -> Result<Survey> {
        let surveys = self.store.surveys();
        let key = match &req.id {
            Some(id) => {
                let key = DocKey::decode(id)?;
                surveys.merge(&key, req.to_document()).await?;
                key
            }
            None => surveys.insert(req.to_document()).await?,
        };

        let doc = surveys
            .find_by_key(&key)
            .await?
            .ok_or_else(|| SurveyKitError::NotFound(format!("survey {} not found", key)))?;
        Survey::from_document(doc)
    }

    async fn try_get(
        &self,
        id: &str,
    ) -> Result<Survey> {
        let key = DocKey::decode(id)?;
        let doc = self
            .store
            .surveys()
            .find_by_key(&key)
            .await?
            .ok_or_else(|| SurveyKitError::NotFound(format!("survey {} not found", id)))?;
        Survey::from_document(doc)
    }

    async fn try_list(
        &self,
        req: &GetSurveysRequest,
    ) -> Result<Vec<Survey>> {
        let page = Page {
            offset: req.offset,
            limit: req.limit,
        };
        let docs = self.store.surveys().find(&Filter::new(), &[SortSpec::asc("title")], &page).await?;
        docs.into_iter().map(Survey::from_document).collect()
    }

    async fn try_delete(
        &self,
        id: &str,
    ) -> Result<()> {
        let key = DocKey::decode(id)?;
        self.store.surveys().delete(&key).await?;
        Ok(())
    }
}
