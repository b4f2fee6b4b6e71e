use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};
use surveykit::{
    AssembleResponse, CoreBuilder, EntryOpsListener, GetEntriesResponse, GetEntryResponse, GetQuestionResponse, GetQuestionsResponse,
    GetSurveyResponse, GetSurveysRequest, GetSurveysResponse, QuestionOpsListener, StatusResponse, SurveyOpsListener, UpdateEntryRequest,
    UpdateEntryResponse, UpdateQuestionRequest, UpdateQuestionResponse, UpdateSurveyRequest, UpdateSurveyResponse,
};

/// Records every callback as `(event name, serialized envelope)`.
#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<(String, JsonValue)>>,
}

impl Recorder {
    fn record<T: serde::Serialize>(
        &self,
        event: &str,
        resp: &T,
    ) {
        self.events.lock().unwrap().push((event.to_string(), serde_json::to_value(resp).unwrap()));
    }

    fn take(&self) -> Vec<(String, JsonValue)> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

#[async_trait]
impl SurveyOpsListener for Recorder {
    async fn on_survey_updated(
        &self,
        resp: UpdateSurveyResponse,
    ) {
        self.record("survey_updated", &resp);
    }

    async fn on_surveys_fetched(
        &self,
        resp: GetSurveysResponse,
    ) {
        self.record("surveys_fetched", &resp);
    }

    async fn on_survey_fetched(
        &self,
        resp: GetSurveyResponse,
    ) {
        self.record("survey_fetched", &resp);
    }

    async fn on_survey_deleted(
        &self,
        resp: StatusResponse,
    ) {
        self.record("survey_deleted", &resp);
    }

    async fn on_survey_hierarchy_fetched(
        &self,
        resp: AssembleResponse,
    ) {
        self.record("hierarchy_fetched", &resp);
    }
}

#[async_trait]
impl QuestionOpsListener for Recorder {
    async fn on_question_updated(
        &self,
        resp: UpdateQuestionResponse,
    ) {
        self.record("question_updated", &resp);
    }

    async fn on_questions_fetched(
        &self,
        resp: GetQuestionsResponse,
    ) {
        self.record("questions_fetched", &resp);
    }

    async fn on_question_fetched(
        &self,
        resp: GetQuestionResponse,
    ) {
        self.record("question_fetched", &resp);
    }

    async fn on_question_deleted(
        &self,
        resp: StatusResponse,
    ) {
        self.record("question_deleted", &resp);
    }
}

#[async_trait]
impl EntryOpsListener for Recorder {
    async fn on_entry_created(
        &self,
        resp: UpdateEntryResponse,
    ) {
        self.record("entry_created", &resp);
    }

    async fn on_entries_fetched(
        &self,
        resp: GetEntriesResponse,
    ) {
        self.record("entries_fetched", &resp);
    }

    async fn on_entry_fetched(
        &self,
        resp: GetEntryResponse,
    ) {
        self.record("entry_fetched", &resp);
    }

    async fn on_entry_deleted(
        &self,
        resp: StatusResponse,
    ) {
        self.record("entry_deleted", &resp);
    }
}

#[tokio::test]
async fn test_each_operation_fires_exactly_one_callback() {
    let core = CoreBuilder::new().build().unwrap();
    let recorder = Recorder::default();

    core.survey_ops().update_survey(&UpdateSurveyRequest::new().name("S1").title("S1"), &recorder).await;
    let events = recorder.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "survey_updated");
    assert_eq!(events[0].1["isSuccess"], json!(true));

    core.survey_ops().get_surveys(&GetSurveysRequest::default(), &recorder).await;
    let events = recorder.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "surveys_fetched");
}

#[tokio::test]
async fn test_failures_reach_the_listener_as_envelopes() {
    let core = CoreBuilder::new().build().unwrap();
    let recorder = Recorder::default();

    core.survey_ops().get_survey("malformed", &recorder).await;
    let events = recorder.take();
    assert_eq!(events[0].0, "survey_fetched");
    assert_eq!(events[0].1["isSuccess"], json!(false));
    assert_eq!(events[0].1["code"], json!(500));
}

#[tokio::test]
async fn test_end_to_end_walk() {
    let core = CoreBuilder::new().build().unwrap();
    core.connect().await.unwrap();
    let recorder = Recorder::default();

    core.survey_ops()
        .update_survey(&UpdateSurveyRequest::new().name("S1").title("S1").description(""), &recorder)
        .await;
    let survey = recorder.take().remove(0).1;
    assert_eq!(survey["data"]["name"], json!("S1"));
    let survey_id = survey["data"]["id"].as_str().unwrap().to_string();

    core.question_ops()
        .update_question(&UpdateQuestionRequest::new(&survey_id).name("Q1").title("Q1").order(1), &recorder)
        .await;
    let question = recorder.take().remove(0).1;
    assert_eq!(question["data"]["surveyId"], json!(survey_id));
    assert_eq!(question["data"]["type"], json!("text"));
    let question_id = question["data"]["id"].as_str().unwrap().to_string();

    core.question_ops().get_questions_by_survey(&survey_id, &recorder).await;
    let listed = recorder.take().remove(0).1;
    assert_eq!(listed["data"][0]["id"], json!(question_id));

    core.entry_ops().update_entry(&UpdateEntryRequest::new(&survey_id).field("Q1", "an answer"), &recorder).await;
    let entry = recorder.take().remove(0).1;
    assert_eq!(entry["data"]["Q1"], json!("an answer"));

    core.entry_ops().get_entries_by_survey(&survey_id, &recorder).await;
    assert_eq!(recorder.take().remove(0).1["data"].as_array().unwrap().len(), 1);

    core.survey_ops().get_survey_hierarchy(&survey_id, &recorder).await;
    let hierarchy = recorder.take().remove(0).1;
    assert_eq!(hierarchy["data"]["elements"][0]["htmlId"], json!(question_id));

    core.survey_ops().delete_survey(&survey_id, &recorder).await;
    assert_eq!(recorder.take().remove(0).1["isSuccess"], json!(true));

    core.survey_ops().get_survey(&survey_id, &recorder).await;
    let missing = recorder.take().remove(0).1;
    assert_eq!(missing["isSuccess"], json!(false));
    assert_eq!(missing["code"], json!(404));

    core.shutdown().await.unwrap();
    // second shutdown is a no-op
    core.shutdown().await.unwrap();
}
