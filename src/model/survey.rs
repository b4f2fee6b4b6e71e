use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{Result, store::Document};

use super::{take_key, take_string};

/// A survey definition: the typed core attributes plus any number of
/// open-ended presentation attributes that round-trip verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    /// External identifier, assigned by the store on first creation and
    /// immutable thereafter.
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Open-ended presentation attributes.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Survey {
    /// Projects a stored document back into the entity. Fields beyond the
    /// typed core pass through into `extra` unchanged.
    pub fn from_document(mut doc: Document) -> Result<Self> {
        let id = take_key(&mut doc)?;
        let name = take_string(&mut doc, "name");
        let title = take_string(&mut doc, "title");
        let description = take_string(&mut doc, "description");

        Ok(Self {
            id,
            name,
            title,
            description,
            extra: doc.into_inner(),
        })
    }
}
