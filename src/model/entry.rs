use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{Result, store::Document};

use super::{take_key, take_survey_ref};

/// A submitted survey response. Answer fields are keyed by question name
/// and are not validated against the survey's question list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyEntry {
    pub id: String,
    /// External identifier of the owning survey.
    pub survey_id: String,
    /// Server-assigned creation time, epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    /// Open-ended answer data.
    #[serde(flatten)]
    pub answers: Map<String, JsonValue>,
}

impl SurveyEntry {
    pub fn from_document(mut doc: Document) -> Result<Self> {
        let id = take_key(&mut doc)?;
        let survey_id = take_survey_ref(&mut doc)?;
        let timestamp = doc.remove("timestamp").and_then(|value| value.as_i64()).unwrap_or(0);

        Ok(Self {
            id,
            survey_id,
            timestamp,
            answers: doc.into_inner(),
        })
    }
}
