///! DX index HTTP client
///!
///! One GET per fetch, no retries: a failure here ends the run.

use reqwest::Client;
use std::time::Duration;

use super::error::FetchError;
use super::parser::parse_conditions_json;
use super::types::ConditionsSnapshot;

const USER_AGENT: &str = concat!("dx-index/", env!("CARGO_PKG_VERSION"));

/// Owns the HTTP client and the endpoint it polls
pub struct ConditionsFetcher {
    client: Client,
    url: String,
}

impl ConditionsFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET → parse one conditions document
    pub async fn fetch(&self) -> Result<ConditionsSnapshot, FetchError> {
        tracing::debug!("Fetching DX conditions from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("DX index API returned {} for {}", status, self.url);
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        let snapshot = parse_conditions_json(&body)?;

        tracing::info!(
            "DX snapshot: {} bands, updated {}, fetched at {}",
            snapshot.document.bands.len(),
            snapshot.document.updated.as_deref().unwrap_or("unknown"),
            snapshot.fetched_at
        );

        Ok(snapshot)
    }
}
