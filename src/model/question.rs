use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{Result, store::Document};

use super::{take_key, take_string, take_survey_ref};

/// Closed enumeration of question types.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Text,
    Checkbox,
    Radiogroup,
    Dropdown,
    Comment,
    Rating,
    Boolean,
    Matrix,
    Ranking,
    Html,
    Expression,
    Imagepicker,
    File,
    Multipletext,
}

/// A question attached to a survey. Questions within a survey are mutually
/// ordered by `order`; values need not be contiguous or unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// External identifier of the owning survey.
    pub survey_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    #[serde(default)]
    pub order: i64,
    /// Open-ended type-specific attributes (choices, validators, ...).
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Question {
    /// Projects a stored document back into the entity. The owning-survey
    /// reference is decoded from its internal key form.
    pub fn from_document(mut doc: Document) -> Result<Self> {
        let id = take_key(&mut doc)?;
        let survey_id = take_survey_ref(&mut doc)?;
        let name = take_string(&mut doc, "name");
        let title = take_string(&mut doc, "title");
        let question_type = match doc.remove("type") {
            Some(value) => serde_json::from_value(value)?,
            None => QuestionType::default(),
        };
        let order = take_order(&mut doc);

        Ok(Self {
            id,
            survey_id,
            name,
            title,
            question_type,
            order,
            extra: doc.into_inner(),
        })
    }
}

/// Stored documents may carry `order` as any JSON number, or not at all;
/// absent and non-numeric values read as 0.
fn take_order(doc: &mut Document) -> i64 {
    doc.remove("order")
        .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(|n| n as i64)))
        .unwrap_or(0)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::{Question, QuestionType};
    use crate::store::{DocKey, Document, KEY_FIELD};

    #[test]
    fn test_question_type_wire_form() {
        assert_eq!(serde_json::to_value(QuestionType::Radiogroup).unwrap(), json!("radiogroup"));
        assert_eq!(serde_json::from_value::<QuestionType>(json!("multipletext")).unwrap(), QuestionType::Multipletext);
        assert!(serde_json::from_value::<QuestionType>(json!("telepathy")).is_err());
    }

    #[test]
    fn test_from_document_tolerates_float_order() {
        let key = DocKey::generate();
        let survey_key = DocKey::generate();
        let doc = Document::new()
            .with(KEY_FIELD, key.to_value())
            .with("surveyId", survey_key.to_value())
            .with("name", "Q1")
            .with("order", 2.0);

        let question = Question::from_document(doc).unwrap();
        assert_eq!(question.order, 2);
        assert_eq!(question.survey_id, survey_key.encode());
    }

    #[test]
    fn test_from_document_defaults_missing_order_and_type() {
        let doc = Document::new()
            .with(KEY_FIELD, DocKey::generate().to_value())
            .with("surveyId", DocKey::generate().to_value());

        let question = Question::from_document(doc).unwrap();
        assert_eq!(question.order, 0);
        assert_eq!(question.question_type, QuestionType::Text);
    }
}
