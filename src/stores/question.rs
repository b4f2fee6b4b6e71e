use std::sync::Arc;

use tracing::trace;

use crate::{
    GetQuestionResponse, GetQuestionsResponse, Result, StatusResponse, SurveyKitError, UpdateQuestionResponse,
    model::{Question, SURVEY_REF, UpdateQuestionRequest},
    store::{DocKey, Filter, Page, SortSpec, Store},
};

use super::{settle, settle_status};

/// CRUD operations for questions.
pub struct QuestionStore {
    store: Arc<Store>,
}

impl QuestionStore {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
        }
    }

    /// Create-or-patch. Every request carries the owning-survey identifier,
    /// which is stored in internal key form and never taken from the
    /// generic field copy. The survey's existence is not checked in the
    /// same operation: a question created against a concurrently-deleted
    /// survey may be orphaned.
    pub async fn update(
        &self,
        req: &UpdateQuestionRequest,
    ) -> UpdateQuestionResponse {
        trace!("questions::update({:?}, survey={})", req.id, req.survey_id);
        settle("questions::update", self.try_update(req).await)
    }

    /// Lists a survey's questions, stable-sorted ascending by `order`;
    /// equal orders preserve insertion order.
    pub async fn list_by_survey(
        &self,
        survey_id: &str,
    ) -> GetQuestionsResponse {
        trace!("questions::list_by_survey({})", survey_id);
        settle("questions::list_by_survey", self.try_list_by_survey(survey_id).await)
    }

    pub async fn get_by_id(
        &self,
        id: &str,
    ) -> GetQuestionResponse {
        trace!("questions::get_by_id({})", id);
        settle("questions::get_by_id", self.try_get_by_id(id).await)
    }

    /// Idempotent delete, scoped by the question's own identifier.
    pub async fn delete_by_id(
        &self,
        id: &str,
    ) -> StatusResponse {
        trace!("questions::delete_by_id({})", id);
        settle_status("questions::delete_by_id", self.try_delete_by_id(id).await)
    }

    async fn try_update(
        &self,
        req: &UpdateQuestionRequest,
    ) -> Result<Question> {
        let survey_key = DocKey::decode(&req.survey_id)?;
        let mut doc = req.to_document();
        doc.set(SURVEY_REF, survey_key.to_value());

        let questions = self.store.questions();
        let key = match &req.id {
            Some(id) => {
                let key = DocKey::decode(id)?;
                questions.merge(&key, doc).await?;
                key
            }
            None => questions.insert(doc).await?,
        };

        let stored = questions
            .find_by_key(&key)
            .await?
            .ok_or_else(|| SurveyKitError::NotFound(format!("question {} not found", key)))?;
        Question::from_document(stored)
    }

    async fn try_list_by_survey(
        &self,
        survey_id: &str,
    ) -> Result<Vec<Question>> {
        let survey_key = DocKey::decode(survey_id)?;
        let filter = Filter::new().eq(SURVEY_REF, survey_key.to_value());
        let docs = self.store.questions().find(&filter, &[SortSpec::asc("order")], &Page::default()).await?;
        docs.into_iter().map(Question::from_document).collect()
    }

    async fn try_get_by_id(
        &self,
        id: &str,
    ) -> Result<Question> {
        let key = DocKey::decode(id)?;
        let doc = self
            .store
            .questions()
            .find_by_key(&key)
            .await?
            .ok_or_else(|| SurveyKitError::NotFound(format!("question {} not found", id)))?;
        Question::from_document(doc)
    }

    async fn try_delete_by_id(
        &self,
        id: &str,
    ) -> Result<()> {
        let key = DocKey::decode(id)?;
        self.store.questions().delete(&key).await?;
        Ok(())
    }
}
