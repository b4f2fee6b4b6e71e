use surveykit::{CoreBuilder, QuestionType, UpdateEntryRequest, UpdateQuestionRequest, UpdateSurveyRequest};

#[tokio::main]
async fn main() {
    let core = CoreBuilder::new().build().unwrap();
    core.connect().await.unwrap();

    let survey = core
        .surveys()
        .update(&UpdateSurveyRequest::new().name("customer-voice").title("Customer Voice").description("Quarterly feedback").field("locale", "en"))
        .await
        .data
        .unwrap();
    println!("Created survey {}", survey.id);

    core.questions()
        .update(&UpdateQuestionRequest::new(&survey.id).name("score").title("How satisfied are you?").question_type(QuestionType::Rating).order(2).field("rateMax", 10))
        .await
        .data
        .unwrap();
    core.questions()
        .update(&UpdateQuestionRequest::new(&survey.id).name("comments").title("Anything to add?").question_type(QuestionType::Comment).order(1))
        .await
        .data
        .unwrap();

    let entry = core
        .entries()
        .create(&UpdateEntryRequest::new(&survey.id).field("score", 9).field("comments", "keep it up"))
        .await
        .data
        .unwrap();
    println!("Recorded entry {} at {}", entry.id, entry.timestamp);

    let hierarchy = core.hierarchy().assemble(&survey.id).await;
    println!("Hierarchy: {:#?}", hierarchy.data.unwrap());

    core.shutdown().await.unwrap();
}
