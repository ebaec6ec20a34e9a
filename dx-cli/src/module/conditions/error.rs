use thiserror::Error;

/// Failures that end the process with status 1
#[derive(Debug, Error)]
pub enum FetchError {
    /// Unreachable host, timeout, TLS failure
    #[error("Cannot reach API - {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Cannot reach API - HTTP Error {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Invalid API response - {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid API response - expected a JSON object")]
    NotAnObject,
}
