//! Domain entities, request contracts, and their document projections.
//!
//! Each entity carries a small set of typed core attributes plus an
//! open-ended, ordered extension map; projection copies the extension
//! fields verbatim in both directions, so new optional attributes need
//! no mapping changes.

mod entry;
mod question;
mod request;
mod survey;

use crate::{
    Result, SurveyKitError,
    store::{DocKey, Document, KEY_FIELD},
};

pub use entry::SurveyEntry;
pub use question::{Question, QuestionType};
pub use request::*;
pub use survey::Survey;

/// Wire name of the owning-survey reference.
pub(crate) const SURVEY_REF: &str = "surveyId";

/// Pops the native key field and returns its external string form.
pub(crate) fn take_key(doc: &mut Document) -> Result<String> {
    let value = doc
        .remove(KEY_FIELD)
        .ok_or_else(|| SurveyKitError::Convert("document missing native key".to_string()))?;
    Ok(DocKey::from_value(&value)?.encode())
}

/// Pops the owning-survey reference and decodes it from internal key form.
pub(crate) fn take_survey_ref(doc: &mut Document) -> Result<String> {
    let value = doc
        .remove(SURVEY_REF)
        .ok_or_else(|| SurveyKitError::Convert("document missing survey reference".to_string()))?;
    Ok(DocKey::from_value(&value)?.encode())
}

/// Pops a typed string attribute, defaulting to empty when absent.
pub(crate) fn take_string(
    doc: &mut Document,
    name: &str,
) -> String {
    doc.remove(name).and_then(|value| value.as_str().map(str::to_string)).unwrap_or_default()
}
