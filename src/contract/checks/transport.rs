use async_trait::async_trait;
use crate::contract::check::{require_snapshot, CheckContext, ContractCheck};
use crate::contract::registry::CheckName;
use crate::models::CheckOutcome;

/// The authorized GET must answer 200.
pub struct StatusCodeCheck;

#[async_trait]
impl ContractCheck for StatusCodeCheck {
    fn name(&self) -> CheckName {
        CheckName::StatusCode
    }

    async fn run(&self, cx: &CheckContext) -> CheckOutcome {
        let snapshot = match require_snapshot(cx).await {
            Ok(s) => s,
            Err(outcome) => return outcome,
        };
        status_outcome(snapshot.status())
    }
}

pub(crate) fn status_outcome(status: u16) -> CheckOutcome {
    if status == 200 {
        CheckOutcome::passed("http status is 200")
    } else {
        CheckOutcome::failed(format!("expected http status 200, got {}", status))
    }
}

/// The response must identify itself as JSON.
pub struct ContentTypeCheck;

#[async_trait]
impl ContractCheck for ContentTypeCheck {
    fn name(&self) -> CheckName {
        CheckName::ContentType
    }

    async fn run(&self, cx: &CheckContext) -> CheckOutcome {
        let snapshot = match require_snapshot(cx).await {
            Ok(s) => s,
            Err(outcome) => return outcome,
        };
        content_type_outcome(snapshot.content_type())
    }
}

pub(crate) fn content_type_outcome(content_type: Option<&str>) -> CheckOutcome {
    match content_type {
        Some(value) if value.contains("application/json") => {
            CheckOutcome::passed(format!("content type is '{}'", value))
        }
        Some(value) => CheckOutcome::failed(format!(
            "expected Content-Type to contain application/json, got '{}'",
            value
        )),
        None => CheckOutcome::failed("response carries no Content-Type header"),
    }
}

/// A GET with the Authorization header stripped must be turned away with
/// 401. This is the only check that sends its own request.
pub struct UnauthorizedRejectionCheck;

#[async_trait]
impl ContractCheck for UnauthorizedRejectionCheck {
    fn name(&self) -> CheckName {
        CheckName::UnauthorizedRejection
    }

    async fn run(&self, cx: &CheckContext) -> CheckOutcome {
        match cx.client().probe_unauthorized().await {
            Ok(status) => unauthorized_outcome(status),
            Err(e) => CheckOutcome::failed(format!("unauthorized probe failed: {}", e)),
        }
    }
}

pub(crate) fn unauthorized_outcome(status: u16) -> CheckOutcome {
    if status == 401 {
        CheckOutcome::passed("unauthenticated request rejected with 401")
    } else {
        CheckOutcome::failed(format!(
            "expected 401 for a request without credentials, got {}",
            status
        ))
    }
}
