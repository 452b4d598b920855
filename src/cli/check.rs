use tracing::info;
use crate::cli::commands::CheckArgs;
use crate::config::{ConfigOverrides, ProbeConfig};
use crate::contract::{CheckOptions, SuiteRunner};
use crate::errors::ProbeError;
use crate::reporting::{format_report_json, format_report_text};

pub async fn handle_check(args: CheckArgs) -> Result<(), ProbeError> {
    let config = ProbeConfig::resolve(&ConfigOverrides {
        base_url: args.base_url,
        organization_id: args.organization_id,
        token: args.token,
        timeout_secs: args.timeout,
    })?;
    info!(endpoint = %config.endpoint_url(), "Running conformance checks");

    let options = CheckOptions {
        error_marker: args.error_marker,
    };
    let runner = SuiteRunner::new(&config, options)?;
    let report = runner.run().await;

    if args.json {
        println!("{}", format_report_json(&report)?);
    } else {
        print!("{}", format_report_text(&report));
    }

    // The file artifact is always JSON so it stays machine-readable
    if let Some(path) = &args.output {
        std::fs::write(path, format_report_json(&report)?)?;
        info!(path = %path.display(), "Report written");
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(ProbeError::Conformance(format!(
            "{} of {} checks failed",
            report.failed(),
            report.total()
        )))
    }
}
