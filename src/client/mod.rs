pub mod snapshot;

pub use snapshot::{ResponseSnapshot, SnapshotCache};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use crate::config::ProbeConfig;
use crate::errors::ProbeError;
use tracing::debug;

/// HTTP access to the optimizations overview endpoint. Holds the composed
/// endpoint URL and the bearer token; the underlying client carries the
/// explicit request timeout from the configuration.
pub struct OverviewClient {
    http: Client,
    endpoint: String,
    auth_token: String,
}

impl OverviewClient {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProbeError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint_url(),
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Authorized GET against the overview endpoint. Captures whatever came
    /// back, including non-200 statuses and undecodable bodies; only
    /// transport-level problems surface as errors.
    pub async fn fetch_overview(&self) -> Result<ResponseSnapshot, ProbeError> {
        debug!(endpoint = %self.endpoint, "Requesting optimizations overview");

        let resp = self
            .http
            .get(&self.endpoint)
            .bearer_auth(&self.auth_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_text = resp.text().await.map_err(map_transport_error)?;

        debug!(status, bytes = body_text.len(), "Overview response received");
        Ok(ResponseSnapshot::capture(status, content_type, body_text))
    }

    /// The negative probe: the same GET with the Authorization header
    /// deliberately absent. Returns only the status code; the body of a
    /// rejection is not part of the contract.
    pub async fn probe_unauthorized(&self) -> Result<u16, ProbeError> {
        debug!(endpoint = %self.endpoint, "Probing endpoint without credentials");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = resp.status().as_u16();
        debug!(status, "Unauthenticated probe response received");
        Ok(status)
    }
}

fn map_transport_error(e: reqwest::Error) -> ProbeError {
    if e.is_timeout() {
        ProbeError::Timeout(format!("request timed out: {}", e))
    } else {
        ProbeError::Network(format!("request failed: {}", e))
    }
}
