use tracing::{info, warn};
use crate::cli::commands::FetchArgs;
use crate::client::OverviewClient;
use crate::config::{ConfigOverrides, ProbeConfig};
use crate::errors::ProbeError;
use crate::utils::formatting::preview;

pub async fn handle_fetch(args: FetchArgs) -> Result<(), ProbeError> {
    let config = ProbeConfig::resolve(&ConfigOverrides {
        base_url: args.base_url,
        organization_id: args.organization_id,
        token: args.token,
        timeout_secs: args.timeout,
    })?;
    info!(endpoint = %config.endpoint_url(), "Fetching optimizations overview");

    let client = OverviewClient::new(&config)?;
    let snapshot = client.fetch_overview().await?;
    if snapshot.status() != 200 {
        warn!(
            status = snapshot.status(),
            body = %preview(snapshot.body_text(), 200),
            "Overview endpoint returned a non-success status"
        );
    }

    let rendered = if args.raw {
        snapshot.body_text().to_string()
    } else {
        let body = snapshot.json().map_err(|msg| {
            ProbeError::Decode(format!("response body is not valid JSON: {}", msg))
        })?;
        serde_json::to_string_pretty(body)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            info!(path = %path.display(), bytes = rendered.len(), "Response written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
