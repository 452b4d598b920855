use std::path::PathBuf;
use clap::{Parser, Subcommand, Args};
use crate::contract::categories::DEFAULT_ERROR_MARKER;

fn long_version() -> String {
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    let build_ts = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown");
    format!("{} ({} {})", env!("CARGO_PKG_VERSION"), git_hash, build_ts)
}

#[derive(Parser)]
#[command(
    name = "optprobe",
    version,
    long_version = long_version(),
    about = "Conformance probe for cloud cost optimization overview APIs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the conformance checks against the overview endpoint
    Check(CheckArgs),
    /// Fetch the overview response and print it
    Fetch(FetchArgs),
    /// List the registered checks
    Checks,
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    /// API base URL (overrides BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Organization identifier (overrides ORGANIZATION_ID)
    #[arg(long)]
    pub organization_id: Option<String>,

    /// Bearer token (overrides AUTH_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Request timeout in seconds (overrides REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Substring expected inside an embedded category error
    #[arg(long, default_value = DEFAULT_ERROR_MARKER)]
    pub error_marker: String,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct FetchArgs {
    /// API base URL (overrides BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Organization identifier (overrides ORGANIZATION_ID)
    #[arg(long)]
    pub organization_id: Option<String>,

    /// Bearer token (overrides AUTH_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Request timeout in seconds (overrides REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the body exactly as received, without decoding
    #[arg(long)]
    pub raw: bool,

    /// Write the response body to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
