use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{SurveyKitError, model::*};

/// Uniform success/failure wrapper returned by every core operation:
/// 200 on success, 404 for not-found, 500 for everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            is_success: true,
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    /// Payload-less success, used by delete operations.
    pub fn status() -> Self {
        Self {
            is_success: true,
            code: 200,
            message: "success".to_string(),
            data: None,
        }
    }

    pub fn failure(err: &SurveyKitError) -> Self {
        Self {
            is_success: false,
            code: err.code(),
            message: err.to_string(),
            data: None,
        }
    }

    /// Failure carrying another envelope's code and message, used when a
    /// composite operation propagates an inner failure with a null payload.
    pub fn failure_with(
        code: u16,
        message: &str,
    ) -> Self {
        Self {
            is_success: false,
            code,
            message: message.to_string(),
            data: None,
        }
    }
}

impl<T> From<Result<T, SurveyKitError>> for Envelope<T> {
    fn from(result: Result<T, SurveyKitError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(&err),
        }
    }
}

pub type StatusResponse = Envelope<()>;
pub type UpdateSurveyResponse = Envelope<Survey>;
pub type GetSurveyResponse = Envelope<Survey>;
pub type GetSurveysResponse = Envelope<Vec<Survey>>;
pub type UpdateQuestionResponse = Envelope<Question>;
pub type GetQuestionResponse = Envelope<Question>;
pub type GetQuestionsResponse = Envelope<Vec<Question>>;
pub type UpdateEntryResponse = Envelope<SurveyEntry>;
pub type GetEntryResponse = Envelope<SurveyEntry>;
pub type GetEntriesResponse = Envelope<Vec<SurveyEntry>>;
pub type AssembleResponse = Envelope<JsonValue>;
