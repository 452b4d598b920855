use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::outcome::Verdict;
use crate::contract::registry::CheckName;

/// One executed check in a run, with its position in the fixed reporting
/// order and how long it took.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    pub number: usize,
    pub name: CheckName,
    pub display_name: String,
    pub verdict: Verdict,
    pub detail: String,
    pub elapsed_ms: u64,
}

/// Aggregated outcome of one conformance run against one endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub endpoint: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub checks: Vec<CheckRecord>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn passed(&self) -> usize {
        self.count_verdict(Verdict::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count_verdict(Verdict::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count_verdict(Verdict::Skipped)
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count_verdict(&self, verdict: Verdict) -> usize {
        self.checks.iter().filter(|c| c.verdict == verdict).count()
    }
}
