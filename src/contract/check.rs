use std::sync::Arc;
use async_trait::async_trait;
use serde_json::Value;
use crate::client::{OverviewClient, ResponseSnapshot, SnapshotCache};
use crate::contract::categories::DEFAULT_ERROR_MARKER;
use crate::contract::registry::CheckName;
use crate::models::CheckOutcome;

/// Per-run tuning of individual checks.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Substring an embedded section error must contain.
    pub error_marker: String,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }
}

/// Everything a check may consult: the shared response snapshot (fetched at
/// most once per run, failure included) and the client for the one check
/// that issues its own request.
pub struct CheckContext {
    client: OverviewClient,
    cache: SnapshotCache,
    options: CheckOptions,
}

impl CheckContext {
    pub fn new(client: OverviewClient, options: CheckOptions) -> Self {
        Self {
            client,
            cache: SnapshotCache::new(),
            options,
        }
    }

    pub fn client(&self) -> &OverviewClient {
        &self.client
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// The memoized authorized response for this run.
    pub async fn snapshot(&self) -> Result<Arc<ResponseSnapshot>, Arc<crate::errors::ProbeError>> {
        self.cache.get_or_fetch(|| self.client.fetch_overview()).await
    }
}

/// One conformance check. Checks are independent of each other and must not
/// issue requests of their own; the single exception is the unauthorized
/// rejection probe, which exists to send a credential-stripped request.
#[async_trait]
pub trait ContractCheck: Send + Sync {
    fn name(&self) -> CheckName;

    async fn run(&self, cx: &CheckContext) -> CheckOutcome;
}

/// Resolve the shared snapshot or turn the memoized fetch error into this
/// check's failure.
pub(crate) async fn require_snapshot(
    cx: &CheckContext,
) -> Result<Arc<ResponseSnapshot>, CheckOutcome> {
    cx.snapshot()
        .await
        .map_err(|e| CheckOutcome::failed(format!("overview fetch failed: {}", e)))
}

/// Resolve the decoded body or fail with the captured decode message.
pub(crate) fn require_body(snapshot: &ResponseSnapshot) -> Result<&Value, CheckOutcome> {
    snapshot.json().map_err(|msg| {
        CheckOutcome::failed(format!("response body is not valid JSON: {}", msg))
    })
}
