use std::fmt;

use serde_json::{Value as JsonValue, json};

use crate::{Result, SurveyKitError, utils};

/// Byte width of the store-native key.
const KEY_LEN: usize = 12;
/// Length of the external hex form.
const ENCODED_LEN: usize = 2 * KEY_LEN;
/// Tag of the internal document form.
const KEY_TAG: &str = "$key";

const HEX_ALPHABET: [char; 16] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f'];

/// Store-native document key.
///
/// Externally a key is always the 24-character lowercase hex string; inside
/// stored documents it is the tagged form `{"$key": "<hex>"}`, which keeps
/// key references structurally distinct from ordinary string fields. The
/// internal forms never cross the core boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocKey([u8; KEY_LEN]);

impl DocKey {
    /// Generates a fresh key: a 4-byte unix-seconds prefix followed by
    /// 8 random bytes. Keys are never reused or mutated once assigned.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        let secs = utils::time::time_secs() as u32;
        bytes[..4].copy_from_slice(&secs.to_be_bytes());

        let suffix = nanoid::nanoid!((2 * (KEY_LEN - 4)), &HEX_ALPHABET);
        for (i, chunk) in suffix.as_bytes().chunks(2).enumerate() {
            let hi = (chunk[0] as char).to_digit(16).unwrap_or(0) as u8;
            let lo = (chunk[1] as char).to_digit(16).unwrap_or(0) as u8;
            bytes[4 + i] = (hi << 4) | lo;
        }
        Self(bytes)
    }

    /// External string form: 24 lowercase hex characters.
    pub fn encode(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses the external string form. Only the canonical form is accepted:
    /// wrong length, non-hex characters, and uppercase hex are all rejected.
    pub fn decode(s: &str) -> Result<Self> {
        if s.len() != ENCODED_LEN || !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(SurveyKitError::InvalidIdentifier(format!("malformed identifier: {}", s)));
        }
        let bytes = hex::decode(s).map_err(|err| SurveyKitError::InvalidIdentifier(format!("malformed identifier {}: {}", s, err)))?;
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        Ok(Self(key))
    }

    /// Internal document form: `{"$key": "<hex>"}`.
    pub fn to_value(&self) -> JsonValue {
        json!({ KEY_TAG: self.encode() })
    }

    /// Parses the internal document form back into a key.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let tagged = value
            .get(KEY_TAG)
            .and_then(JsonValue::as_str)
            .ok_or_else(|| SurveyKitError::Convert(format!("not a key value: {}", value)))?;
        Self::decode(tagged)
    }
}

impl fmt::Display for DocKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
