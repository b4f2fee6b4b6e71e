//! Error types for surveykit.
//!
//! All errors in surveykit are represented by the `SurveyKitError` enum,
//! which provides specific variants for different error categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all surveykit operations.
///
/// Each variant represents a specific category of error that can occur
/// during identifier decoding, document projection, or storage operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum SurveyKitError {
    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Malformed external identifier strings.
    #[error("{0}")]
    InvalidIdentifier(String),

    /// A well-formed identifier that matched no stored document.
    #[error("{0}")]
    NotFound(String),

    /// Connection or transport failures against the document store.
    #[error("{0}")]
    StoreUnavailable(String),

    /// Storage operation errors.
    #[error("{0}")]
    Store(String),

    /// Data conversion errors (JSON, document projection).
    #[error("{0}")]
    Convert(String),
}

impl SurveyKitError {
    /// Envelope status code for this error.
    ///
    /// `NotFound` maps to 404; every other failure, including malformed
    /// identifiers, keeps the outbound contract's 500.
    pub fn code(&self) -> u16 {
        match self {
            SurveyKitError::NotFound(_) => 404,
            _ => 500,
        }
    }
}

impl From<SurveyKitError> for String {
    fn from(val: SurveyKitError) -> Self {
        val.to_string()
    }
}

impl From<serde_json::Error> for SurveyKitError {
    fn from(error: serde_json::Error) -> Self {
        SurveyKitError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for SurveyKitError {
    fn from(error: toml::de::Error) -> Self {
        SurveyKitError::Config(error.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::SurveyKitError;

    #[test]
    fn test_envelope_codes() {
        assert_eq!(SurveyKitError::NotFound("survey x".to_string()).code(), 404);
        assert_eq!(SurveyKitError::InvalidIdentifier("bad".to_string()).code(), 500);
        assert_eq!(SurveyKitError::StoreUnavailable("down".to_string()).code(), 500);
        assert_eq!(SurveyKitError::Store("op".to_string()).code(), 500);
    }
}
