///! Conditions snapshot type

use chrono::{DateTime, Utc};
use dx_common::ConditionsDocument;
use serde_json::Value;

/// One fetched DX index document
#[derive(Debug, Clone)]
pub struct ConditionsSnapshot {
    /// When this snapshot was fetched
    pub fetched_at: DateTime<Utc>,
    /// Body exactly as served, key order preserved (JSON passthrough)
    pub raw: Value,
    /// Typed view with defaults already applied
    pub document: ConditionsDocument,
}
