//! Structured column encoding.
//!
//! Arrays and opaque payloads are stored as JSON text. Reads never fail on a
//! malformed value: they fall back to the type's default and log a warning.

use crate::Error;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize a structured value into its TEXT column form.
pub(crate) fn encode<T: Serialize + ?Sized>(column: &'static str, value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|e| Error::Encode { column, message: e.to_string() })
}

/// Serialize an optional payload, keeping absence as SQL NULL.
pub(crate) fn encode_optional<T: Serialize>(column: &'static str, value: Option<&T>) -> Result<Option<String>, Error> {
    value.map(|v| encode(column, v)).transpose()
}

/// Decode a TEXT column, defaulting on NULL, empty text or malformed JSON.
pub(crate) fn decode_or_default<T>(table: &'static str, column: &'static str, raw: Option<String>) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return T::default();
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(table, column, error = %e, "malformed stored value, using default");
            T::default()
        }
    }
}
