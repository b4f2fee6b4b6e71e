use std::sync::Arc;

use serde_json::{Value as JsonValue, json};
use tracing::trace;

use crate::{
    AssembleResponse, Envelope, Result, SurveyKitError,
    model::{Question, Survey},
};

use super::{QuestionStore, SurveyStore, settle};

/// Key under which a question's identifier reappears in the hierarchy.
const ELEMENT_ID: &str = "htmlId";

/// Composes a survey with its ordered questions into the single payload
/// consumed by hierarchical clients.
pub struct HierarchyAssembler {
    surveys: Arc<SurveyStore>,
    questions: Arc<QuestionStore>,
}

impl HierarchyAssembler {
    pub fn new(
        surveys: Arc<SurveyStore>,
        questions: Arc<QuestionStore>,
    ) -> Self {
        Self {
            surveys,
            questions,
        }
    }

    /// Builds the hierarchy: the survey's fields minus its identifier,
    /// plus an `elements` sequence of its questions in ascending `order`.
    /// Each element drops its bookkeeping fields (`id`, `surveyId`,
    /// `order`) and carries its identifier under `htmlId` instead.
    ///
    /// A failed survey fetch propagates unchanged; a failed question fetch
    /// propagates its code and message with a null payload.
    pub async fn assemble(
        &self,
        survey_id: &str,
    ) -> AssembleResponse {
        trace!("hierarchy::assemble({})", survey_id);

        let survey = self.surveys.get(survey_id).await;
        let survey = match (survey.is_success, survey.data) {
            (true, Some(survey)) => survey,
            _ => return Envelope::failure_with(survey.code, &survey.message),
        };

        let questions = self.questions.list_by_survey(survey_id).await;
        let questions = match (questions.is_success, questions.data) {
            (true, Some(questions)) => questions,
            _ => return Envelope::failure_with(questions.code, &questions.message),
        };

        settle("hierarchy::assemble", build(&survey, &questions))
    }
}

fn build(
    survey: &Survey,
    questions: &[Question],
) -> Result<JsonValue> {
    let JsonValue::Object(mut root) = serde_json::to_value(survey)? else {
        return Err(SurveyKitError::Convert("survey did not project to an object".to_string()));
    };
    root.remove("id");

    let mut elements = Vec::with_capacity(questions.len());
    for question in questions {
        let JsonValue::Object(mut element) = serde_json::to_value(question)? else {
            return Err(SurveyKitError::Convert("question did not project to an object".to_string()));
        };
        if let Some(id) = element.remove("id") {
            element.insert(ELEMENT_ID.to_string(), id);
        }
        element.remove("surveyId");
        element.remove("order");
        elements.push(JsonValue::Object(element));
    }
    root.insert("elements".to_string(), json!(elements));

    Ok(JsonValue::Object(root))
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::build;
    use crate::model::{Question, QuestionType, Survey};

    #[test]
    fn test_build_strips_and_renames() {
        let survey = Survey {
            id: "a".repeat(24),
            name: "S1".to_string(),
            title: "Survey 1".to_string(),
            description: "".to_string(),
            extra: serde_json::Map::new(),
        };
        let question = Question {
            id: "b".repeat(24),
            survey_id: survey.id.clone(),
            name: "Q1".to_string(),
            title: "Question 1".to_string(),
            question_type: QuestionType::Text,
            order: 1,
            extra: serde_json::Map::new(),
        };

        let hierarchy = build(&survey, &[question]).unwrap();
        assert!(hierarchy.get("id").is_none());
        assert_eq!(hierarchy["name"], json!("S1"));

        let element = &hierarchy["elements"][0];
        assert_eq!(element["htmlId"], json!("b".repeat(24)));
        assert!(element.get("id").is_none());
        assert!(element.get("surveyId").is_none());
        assert!(element.get("order").is_none());
        assert_eq!(element["type"], json!("text"));
    }
}
