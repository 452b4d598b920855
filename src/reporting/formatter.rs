use console::style;
use crate::errors::ProbeError;
use crate::models::{RunReport, Verdict};
use crate::utils::formatting::format_duration;

/// Render a run report as the human-readable console listing.
pub fn format_report_text(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        style("Endpoint conformance report").white().bold()
    ));
    out.push_str(&format!("  run:      {}\n", report.run_id));
    out.push_str(&format!("  endpoint: {}\n", report.endpoint));
    out.push_str(&format!("  started:  {}\n\n", report.started_at.to_rfc3339()));

    for record in &report.checks {
        let tag = match record.verdict {
            Verdict::Passed => style("PASS").green().bold(),
            Verdict::Failed => style("FAIL").red().bold(),
            Verdict::Skipped => style("SKIP").yellow(),
        };
        out.push_str(&format!(
            "  {} [{}] {:<26} {}\n",
            tag,
            record.number,
            record.name.as_str(),
            record.detail
        ));
    }

    let summary = format!(
        "{} checks: {} passed, {} failed, {} skipped ({})",
        report.total(),
        report.passed(),
        report.failed(),
        report.skipped(),
        format_duration(report.duration_ms)
    );
    let summary = if report.is_success() {
        style(summary).green()
    } else {
        style(summary).red()
    };
    out.push_str(&format!("\n{}\n", summary));
    out
}

pub fn format_report_json(report: &RunReport) -> Result<String, ProbeError> {
    Ok(serde_json::to_string_pretty(report)?)
}
