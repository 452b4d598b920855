use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use crate::client::OverviewClient;
use crate::config::ProbeConfig;
use crate::errors::ProbeError;
use crate::models::{CheckRecord, RunReport, Verdict};
use super::check::{CheckContext, CheckOptions, ContractCheck};
use super::registry::{default_checks, definition_for};

/// Drives the registered checks against one memoized overview response.
pub struct SuiteRunner {
    context: CheckContext,
    checks: Vec<Box<dyn ContractCheck>>,
    endpoint: String,
}

impl SuiteRunner {
    pub fn new(config: &ProbeConfig, options: CheckOptions) -> Result<Self, ProbeError> {
        let client = OverviewClient::new(config)?;
        let endpoint = client.endpoint().to_string();
        Ok(Self {
            context: CheckContext::new(client, options),
            checks: default_checks(),
            endpoint,
        })
    }

    /// Swap the default suite for an explicit list of checks.
    pub fn with_checks(mut self, checks: Vec<Box<dyn ContractCheck>>) -> Self {
        self.checks = checks;
        self
    }

    pub async fn run(&self) -> RunReport {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let suite_start = std::time::Instant::now();
        info!(run_id = %run_id, endpoint = %self.endpoint, checks = self.checks.len(), "Check run started");

        // Prime the shared snapshot so later per-check timings stay honest
        if let Err(e) = self.context.snapshot().await {
            warn!(error = %e, "Overview fetch failed, response-dependent checks will fail");
        }

        let mut records = Vec::with_capacity(self.checks.len());
        for (idx, check) in self.checks.iter().enumerate() {
            let name = check.name();
            let display_name = definition_for(name)
                .map(|def| def.display_name)
                .unwrap_or("Unknown")
                .to_string();
            let check_start = std::time::Instant::now();
            let outcome = check.run(&self.context).await;
            let elapsed_ms = check_start.elapsed().as_millis() as u64;

            match outcome.verdict {
                Verdict::Passed => {
                    info!(check = %name, elapsed_ms, "Check passed");
                }
                Verdict::Failed => {
                    warn!(check = %name, elapsed_ms, detail = %outcome.detail, "Check failed");
                }
                Verdict::Skipped => {
                    debug!(check = %name, detail = %outcome.detail, "Check skipped");
                }
            }

            records.push(CheckRecord {
                number: idx + 1,
                name,
                display_name,
                verdict: outcome.verdict,
                detail: outcome.detail,
                elapsed_ms,
            });
        }

        let report = RunReport {
            run_id,
            endpoint: self.endpoint.clone(),
            started_at,
            duration_ms: suite_start.elapsed().as_millis() as u64,
            checks: records,
        };
        info!(
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            duration_ms = report.duration_ms,
            "Check run finished"
        );
        report
    }
}
