use serde_json::json;
use surveykit::{CoreBuilder, DocKey, QuestionType, UpdateQuestionRequest, UpdateSurveyRequest};

#[tokio::test]
async fn test_assemble_orders_strips_and_renames() {
    let core = CoreBuilder::new().build().unwrap();
    let survey = core
        .surveys()
        .update(&UpdateSurveyRequest::new().name("S1").title("Survey 1").description("d").field("locale", "en"))
        .await
        .data
        .unwrap();

    let late = core
        .questions()
        .update(&UpdateQuestionRequest::new(&survey.id).name("late").order(5).question_type(QuestionType::Comment))
        .await
        .data
        .unwrap();
    let early = core
        .questions()
        .update(&UpdateQuestionRequest::new(&survey.id).name("early").order(1).field("choices", json!(["a", "b"])))
        .await
        .data
        .unwrap();

    let resp = core.hierarchy().assemble(&survey.id).await;
    assert!(resp.is_success);
    assert_eq!(resp.code, 200);
    let hierarchy = resp.data.unwrap();

    // survey fields minus its identifier
    assert!(hierarchy.get("id").is_none());
    assert_eq!(hierarchy["name"], json!("S1"));
    assert_eq!(hierarchy["title"], json!("Survey 1"));
    assert_eq!(hierarchy["locale"], json!("en"));

    let elements = hierarchy["elements"].as_array().unwrap();
    assert_eq!(elements.len(), 2);

    // ascending order, bookkeeping fields stripped, identifier renamed
    assert_eq!(elements[0]["name"], json!("early"));
    assert_eq!(elements[0]["htmlId"], json!(early.id));
    assert_eq!(elements[0]["choices"], json!(["a", "b"]));
    assert_eq!(elements[1]["name"], json!("late"));
    assert_eq!(elements[1]["htmlId"], json!(late.id));
    for element in elements {
        assert!(element.get("id").is_none());
        assert!(element.get("surveyId").is_none());
        assert!(element.get("order").is_none());
    }
}

#[tokio::test]
async fn test_assemble_missing_survey_propagates_404() {
    let core = CoreBuilder::new().build().unwrap();
    let never_created = DocKey::generate().encode();

    let resp = core.hierarchy().assemble(&never_created).await;
    assert!(!resp.is_success);
    assert_eq!(resp.code, 404);
    assert!(resp.message.contains(&never_created));
    assert!(resp.data.is_none());
}

#[tokio::test]
async fn test_assemble_malformed_identifier_propagates_500() {
    let core = CoreBuilder::new().build().unwrap();
    let resp = core.hierarchy().assemble("garbage").await;
    assert!(!resp.is_success);
    assert_eq!(resp.code, 500);
    assert!(resp.data.is_none());
}

#[tokio::test]
async fn test_assemble_survey_without_questions() {
    let core = CoreBuilder::new().build().unwrap();
    let survey = core.surveys().update(&UpdateSurveyRequest::new().name("S1").title("S1")).await.data.unwrap();

    let hierarchy = core.hierarchy().assemble(&survey.id).await.data.unwrap();
    assert_eq!(hierarchy["elements"], json!([]));
}
