use serde::{Deserialize, Serialize};

/// Result class for a single conformance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Failed,
    /// The check had nothing to assert against this response, e.g. no
    /// embedded error field was present.
    Skipped,
}

/// What one check observed: the verdict plus a human-readable detail line
/// naming the expected versus actual condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub verdict: Verdict,
    pub detail: String,
}

impl CheckOutcome {
    pub fn passed(detail: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Passed,
            detail: detail.into(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Failed,
            detail: detail.into(),
        }
    }

    pub fn skipped(detail: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Skipped,
            detail: detail.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.verdict == Verdict::Failed
    }
}
