///! Field-level decoders that never fail.
///!
///! The DX index payload is loosely structured: fields may be missing, null,
///! or of an unexpected type. Each field is decoded on its own and anything
///! that does not fit is treated as absent, so one bad field never rejects
///! the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::rating::RatingLabel;

/// Decode into `T`, or `None` on null / wrong type
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Decode a nested record; only JSON objects are accepted
pub fn record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}

/// Decode a string-keyed map of records, dropping entries that are not objects
pub fn record_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(map)) = value else {
        return Ok(BTreeMap::new());
    };

    Ok(map
        .into_iter()
        .filter(|(_, v)| v.is_object())
        .filter_map(|(k, v)| serde_json::from_value(v).ok().map(|record| (k, record)))
        .collect())
}

/// Strings pass through; any other value, `null` included, keeps its JSON text.
///
/// Only called when the key exists, so presence alone yields `Some`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    }))
}

pub fn rating<'de, D>(deserializer: D) -> Result<RatingLabel, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(RatingLabel::from_json(value.as_ref()))
}
