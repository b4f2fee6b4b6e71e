use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};

use crate::store::{Document, KEY_FIELD};

use super::{QuestionType, SURVEY_REF};

/// Fields the identity mechanics reserve: never copied from a request's
/// open-ended fields into a stored document.
const RESERVED: [&str; 3] = ["id", KEY_FIELD, SURVEY_REF];

fn copy_extra(
    doc: &mut Document,
    extra: &Map<String, JsonValue>,
) {
    for (name, value) in extra {
        if RESERVED.contains(&name.as_str()) {
            continue;
        }
        doc.set(name, value.clone());
    }
}

/// Create-or-patch request for a survey: no `id` inserts, an `id` patches.
/// Omitted core fields are left untouched on patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSurveyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl UpdateSurveyRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(
        mut self,
        id: &str,
    ) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn name(
        mut self,
        name: &str,
    ) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn title(
        mut self,
        title: &str,
    ) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn description(
        mut self,
        description: &str,
    ) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn field<T: Into<JsonValue>>(
        mut self,
        name: &str,
        value: T,
    ) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }

    /// Projects the request into a document: only present fields are
    /// written, and reserved fields are never taken from the generic copy.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        if let Some(name) = &self.name {
            doc.set("name", json!(name));
        }
        if let Some(title) = &self.title {
            doc.set("title", json!(title));
        }
        if let Some(description) = &self.description {
            doc.set("description", json!(description));
        }
        copy_extra(&mut doc, &self.extra);
        doc
    }
}

/// Page window for listing surveys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GetSurveysRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Create-or-patch request for a question. `survey_id` is required on
/// create and patch alike; the store encodes it into internal key form
/// and it is never overwritten from the generic field copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub survey_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl UpdateQuestionRequest {
    pub fn new(survey_id: &str) -> Self {
        Self {
            survey_id: survey_id.to_string(),
            ..Self::default()
        }
    }

    pub fn id(
        mut self,
        id: &str,
    ) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn name(
        mut self,
        name: &str,
    ) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn title(
        mut self,
        title: &str,
    ) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn question_type(
        mut self,
        question_type: QuestionType,
    ) -> Self {
        self.question_type = Some(question_type);
        self
    }

    pub fn order(
        mut self,
        order: i64,
    ) -> Self {
        self.order = Some(order);
        self
    }

    pub fn field<T: Into<JsonValue>>(
        mut self,
        name: &str,
        value: T,
    ) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        if let Some(name) = &self.name {
            doc.set("name", json!(name));
        }
        if let Some(title) = &self.title {
            doc.set("title", json!(title));
        }
        if let Some(question_type) = &self.question_type {
            doc.set("type", json!(question_type));
        }
        if let Some(order) = self.order {
            doc.set("order", json!(order));
        }
        copy_extra(&mut doc, &self.extra);
        doc
    }
}

/// Creation request for a survey entry. Entries are append-only; any
/// caller-supplied `timestamp` is overwritten by the store at write time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub survey_id: String,
    #[serde(flatten)]
    pub fields: Map<String, JsonValue>,
}

impl UpdateEntryRequest {
    pub fn new(survey_id: &str) -> Self {
        Self {
            survey_id: survey_id.to_string(),
            ..Self::default()
        }
    }

    pub fn field<T: Into<JsonValue>>(
        mut self,
        name: &str,
        value: T,
    ) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        copy_extra(&mut doc, &self.fields);
        doc
    }
}
