use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    AssembleResponse, GetSurveyResponse, GetSurveysResponse, StatusResponse, UpdateSurveyResponse,
    model::{GetSurveysRequest, UpdateSurveyRequest},
    stores::{HierarchyAssembler, SurveyStore},
};

/// Result listener for survey use-cases.
#[async_trait]
pub trait SurveyOpsListener: Send + Sync {
    async fn on_survey_updated(
        &self,
        resp: UpdateSurveyResponse,
    );

    async fn on_surveys_fetched(
        &self,
        resp: GetSurveysResponse,
    );

    async fn on_survey_fetched(
        &self,
        resp: GetSurveyResponse,
    );

    async fn on_survey_deleted(
        &self,
        resp: StatusResponse,
    );

    async fn on_survey_hierarchy_fetched(
        &self,
        resp: AssembleResponse,
    );
}

/// Survey use-case orchestrator.
pub struct SurveyOps {
    surveys: Arc<SurveyStore>,
    assembler: Arc<HierarchyAssembler>,
}

impl SurveyOps {
    pub fn new(
        surveys: Arc<SurveyStore>,
        assembler: Arc<HierarchyAssembler>,
    ) -> Self {
        Self {
            surveys,
            assembler,
        }
    }

    pub async fn update_survey(
        &self,
        req: &UpdateSurveyRequest,
        listener: &dyn SurveyOpsListener,
    ) {
        listener.on_survey_updated(self.surveys.update(req).await).await;
    }

    pub async fn get_surveys(
        &self,
        req: &GetSurveysRequest,
        listener: &dyn SurveyOpsListener,
    ) {
        listener.on_surveys_fetched(self.surveys.list(req).await).await;
    }

    pub async fn get_survey(
        &self,
        id: &str,
        listener: &dyn SurveyOpsListener,
    ) {
        listener.on_survey_fetched(self.surveys.get(id).await).await;
    }

    pub async fn delete_survey(
        &self,
        id: &str,
        listener: &dyn SurveyOpsListener,
    ) {
        listener.on_survey_deleted(self.surveys.delete(id).await).await;
    }

    pub async fn get_survey_hierarchy(
        &self,
        survey_id: &str,
        listener: &dyn SurveyOpsListener,
    ) {
        listener.on_survey_hierarchy_fetched(self.assembler.assemble(survey_id).await).await;
    }
}
