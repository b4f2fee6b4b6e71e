use std::sync::Arc;

use async_trait::async_trait;

use crate::{GetQuestionResponse, GetQuestionsResponse, StatusResponse, UpdateQuestionResponse, model::UpdateQuestionRequest, stores::QuestionStore};

/// Result listener for question use-cases.
#[async_trait]
pub trait QuestionOpsListener: Send + Sync {
    async fn on_question_updated(
        &self,
        resp: UpdateQuestionResponse,
    );

    async fn on_questions_fetched(
        &self,
        resp: GetQuestionsResponse,
    );

    async fn on_question_fetched(
        &self,
        resp: GetQuestionResponse,
    );

    async fn on_question_deleted(
        &self,
        resp: StatusResponse,
    );
}

/// Question use-case orchestrator.
pub struct QuestionOps {
    questions: Arc<QuestionStore>,
}

impl QuestionOps {
    pub fn new(questions: Arc<QuestionStore>) -> Self {
        Self {
            questions,
        }
    }

    pub async fn update_question(
        &self,
        req: &UpdateQuestionRequest,
        listener: &dyn QuestionOpsListener,
    ) {
        listener.on_question_updated(self.questions.update(req).await).await;
    }

    pub async fn get_questions_by_survey(
        &self,
        survey_id: &str,
        listener: &dyn QuestionOpsListener,
    ) {
        listener.on_questions_fetched(self.questions.list_by_survey(survey_id).await).await;
    }

    pub async fn get_question_by_id(
        &self,
        id: &str,
        listener: &dyn QuestionOpsListener,
    ) {
        listener.on_question_fetched(self.questions.get_by_id(id).await).await;
    }

    pub async fn delete_question_by_id(
        &self,
        id: &str,
        listener: &dyn QuestionOpsListener,
    ) {
        listener.on_question_deleted(self.questions.delete_by_id(id).await).await;
    }
}
