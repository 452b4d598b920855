use std::future::Future;
use std::sync::Arc;
use serde_json::Value;
use tokio::sync::OnceCell;
use crate::errors::ProbeError;

/// One observed HTTP exchange with the overview endpoint. The body is
/// decoded exactly once at capture time; a decode failure is kept as a
/// message instead of propagating, so status and header checks can still
/// run against a non-JSON response.
#[derive(Debug)]
pub struct ResponseSnapshot {
    status: u16,
    content_type: Option<String>,
    body_text: String,
    body: Result<Value, String>,
}

impl ResponseSnapshot {
    pub fn capture(status: u16, content_type: Option<String>, body_text: String) -> Self {
        let body = serde_json::from_str(&body_text).map_err(|e| e.to_string());
        Self {
            status,
            content_type,
            body_text,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    /// The decoded body, or the decode error message captured at fetch time.
    pub fn json(&self) -> Result<&Value, &str> {
        self.body.as_ref().map_err(String::as_str)
    }
}

/// Per-run memoization of the authorized fetch. Both outcomes are cached:
/// once the first caller has fetched (or failed to fetch), every later
/// caller observes the same snapshot or the same error, and no further
/// request leaves the process. A new run constructs a new cache.
#[derive(Default)]
pub struct SnapshotCache {
    cell: OnceCell<Result<Arc<ResponseSnapshot>, Arc<ProbeError>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Arc<ResponseSnapshot>, Arc<ProbeError>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ResponseSnapshot, ProbeError>>,
    {
        self.cell
            .get_or_init(|| async move { fetch().await.map(Arc::new).map_err(Arc::new) })
            .await
            .clone()
    }
}
