//! Bulk SMS sender - main entry point.

use clap::Parser;
use pushbullet_sms::cli::{self, Args};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Logging goes to stderr; stdout carries the prompt and the report.
    let default_filter = if args.verbose {
        "pushbullet_sms=debug,info"
    } else {
        "error"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    cli::run(args).await
}
