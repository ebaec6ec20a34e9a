///! DX index JSON parser

use chrono::Utc;
use dx_common::ConditionsDocument;
use serde_json::Value;

use super::error::FetchError;
use super::types::ConditionsSnapshot;

/// Parse a DX index response body into a [`ConditionsSnapshot`].
///
/// Only the outer shape is checked here: the body must be a JSON object.
/// Individual fields are decoded leniently by [`ConditionsDocument`].
pub fn parse_conditions_json(body: &str) -> Result<ConditionsSnapshot, FetchError> {
    let raw: Value = serde_json::from_str(body)?;
    let document = ConditionsDocument::from_json_value(&raw).ok_or(FetchError::NotAnObject)?;

    Ok(ConditionsSnapshot {
        fetched_at: Utc::now(),
        raw,
        document,
    })
}
