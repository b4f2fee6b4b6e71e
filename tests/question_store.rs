use serde_json::json;
use surveykit::{CoreBuilder, DocKey, QuestionType, SurveyCore, UpdateQuestionRequest, UpdateSurveyRequest};

async fn core_with_survey() -> (SurveyCore, String) {
    let core = CoreBuilder::new().build().unwrap();
    let survey = core.surveys().update(&UpdateSurveyRequest::new().name("S1").title("S1")).await.data.unwrap();
    let id = survey.id;
    (core, id)
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (core, survey_id) = core_with_survey().await;
    let created = core
        .questions()
        .update(
            &UpdateQuestionRequest::new(&survey_id)
                .name("score")
                .title("Score")
                .question_type(QuestionType::Rating)
                .order(1)
                .field("rateMax", 10)
                .field("isRequired", true),
        )
        .await
        .data
        .unwrap();

    assert_eq!(created.survey_id, survey_id);

    let fetched = core.questions().get_by_id(&created.id).await.data.unwrap();
    assert_eq!(fetched.name, "score");
    assert_eq!(fetched.question_type, QuestionType::Rating);
    assert_eq!(fetched.order, 1);
    assert_eq!(fetched.survey_id, survey_id);
    assert_eq!(fetched.extra.get("rateMax"), Some(&json!(10)));
    assert_eq!(fetched.extra.get("isRequired"), Some(&json!(true)));
}

#[tokio::test]
async fn test_list_by_survey_sorts_by_order_with_stable_ties() {
    let (core, survey_id) = core_with_survey().await;
    for (name, order) in [("q5", 5), ("q1", 1), ("tie-first", 3), ("tie-second", 3)] {
        core.questions().update(&UpdateQuestionRequest::new(&survey_id).name(name).order(order)).await.data.unwrap();
    }

    let listed = core.questions().list_by_survey(&survey_id).await.data.unwrap();
    let names = listed.iter().map(|question| question.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["q1", "tie-first", "tie-second", "q5"]);
}

#[tokio::test]
async fn test_list_is_scoped_to_the_survey() {
    let (core, survey_id) = core_with_survey().await;
    let other = core.surveys().update(&UpdateSurveyRequest::new().name("S2").title("S2")).await.data.unwrap();

    core.questions().update(&UpdateQuestionRequest::new(&survey_id).name("mine").order(1)).await.data.unwrap();
    core.questions().update(&UpdateQuestionRequest::new(&other.id).name("theirs").order(1)).await.data.unwrap();

    let listed = core.questions().list_by_survey(&survey_id).await.data.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "mine");
}

#[tokio::test]
async fn test_patch_preserves_unsupplied_fields() {
    let (core, survey_id) = core_with_survey().await;
    let created = core
        .questions()
        .update(&UpdateQuestionRequest::new(&survey_id).name("q1").title("Original").order(1).field("choices", json!(["a", "b"])))
        .await
        .data
        .unwrap();

    let patched = core
        .questions()
        .update(&UpdateQuestionRequest::new(&survey_id).id(&created.id).title("Renamed"))
        .await
        .data
        .unwrap();

    assert_eq!(patched.title, "Renamed");
    assert_eq!(patched.name, "q1");
    assert_eq!(patched.order, 1);
    assert_eq!(patched.survey_id, survey_id);
    assert_eq!(patched.extra.get("choices"), Some(&json!(["a", "b"])));
}

#[tokio::test]
async fn test_survey_reference_is_not_overwritable_from_payload() {
    let (core, survey_id) = core_with_survey().await;
    let created = core
        .questions()
        .update(&UpdateQuestionRequest::new(&survey_id).name("q1").field("surveyId", "spoofed"))
        .await
        .data
        .unwrap();

    assert_eq!(created.survey_id, survey_id);
    assert!(created.extra.get("surveyId").is_none());
}

#[tokio::test]
async fn test_update_rejects_malformed_survey_id() {
    let core = CoreBuilder::new().build().unwrap();
    let resp = core.questions().update(&UpdateQuestionRequest::new("nope").name("q1")).await;
    assert!(!resp.is_success);
    assert_eq!(resp.code, 500);
}

#[tokio::test]
async fn test_get_and_delete_by_id() {
    let (core, survey_id) = core_with_survey().await;
    let created = core.questions().update(&UpdateQuestionRequest::new(&survey_id).name("q1")).await.data.unwrap();

    assert!(core.questions().delete_by_id(&created.id).await.is_success);
    // idempotent second delete
    assert!(core.questions().delete_by_id(&created.id).await.is_success);

    let missing = core.questions().get_by_id(&created.id).await;
    assert_eq!(missing.code, 404);
    assert!(missing.message.contains(&created.id));

    let never_created = DocKey::generate().encode();
    let missing = core.questions().get_by_id(&never_created).await;
    assert_eq!(missing.code, 404);
}
