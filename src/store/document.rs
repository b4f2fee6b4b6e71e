use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A schema-less stored document: an ordered mapping of field names to JSON
/// values. Field insertion order is preserved so open-ended attributes
/// round-trip in the order the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document(Map<String, JsonValue>);

impl Document {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn with<T: Into<JsonValue>>(
        mut self,
        name: &str,
        value: T,
    ) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&JsonValue> {
        self.0.get(name)
    }

    pub fn set<T: Into<JsonValue>>(
        &mut self,
        name: &str,
        value: T,
    ) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn remove(
        &mut self,
        name: &str,
    ) -> Option<JsonValue> {
        self.0.remove(name)
    }

    /// Top-level field-set replacement: every field of `patch` overwrites
    /// the corresponding field here; fields absent from `patch` are left
    /// untouched.
    pub fn merge(
        &mut self,
        patch: Document,
    ) {
        for (name, value) in patch.0 {
            self.0.insert(name, value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Map<String, JsonValue> {
        self.0
    }
}

impl From<Map<String, JsonValue>> for Document {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

impl From<Document> for JsonValue {
    fn from(doc: Document) -> Self {
        JsonValue::Object(doc.0)
    }
}
