//! Command-line surface: argument parsing, the confirmation gate, and the
//! console report.
//!
//! Rendering goes to stdout; logging stays on stderr. The confirmation gate
//! sits between resolution and dispatch, so declining it means no network
//! activity at all.

use crate::client::{AsyncPushbulletTransport, PushbulletClient, SmsTransport};
use crate::config::Config;
use crate::dispatch::{DispatchResult, Dispatcher};
use crate::roster::{resolve, ResolvedGroup, Roster};
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Send one SMS message to groups of recipients through Pushbullet.
#[derive(Debug, Parser)]
#[command(name = "pushbullet-sms", version, about)]
pub struct Args {
    /// Path to a JSON file specifying recipient groups
    #[arg(short, long, required_unless_present = "print_example")]
    pub recipients: Option<PathBuf>,

    /// Message text to send
    #[arg(short, long, conflicts_with = "message_file")]
    pub message: Option<String>,

    /// Path to a plain text file containing the message to send
    #[arg(short = 'f', long)]
    pub message_file: Option<PathBuf>,

    /// Print an example recipients document and exit
    #[arg(long)]
    pub print_example: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Read the message body from the arguments.
fn load_message(args: &Args) -> anyhow::Result<String> {
    match (&args.message, &args.message_file) {
        (Some(text), None) => Ok(text.clone()),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read message file {}", path.display())),
        _ => anyhow::bail!("Either --message or --message-file is required"),
    }
}

/// Ask for confirmation; only `y`/`yes` (case-insensitive, trimmed)
/// proceeds.
pub fn confirm(input: &mut impl BufRead) -> io::Result<bool> {
    print!("Would you like to send? (y/N): ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn render_preview(message: &str, groups: &[ResolvedGroup]) {
    println!("----- MESSAGE -----");
    println!("{}", message);
    println!("----- RECIPIENTS -----");
    for group in groups {
        println!("{}: {}", group.name(), group.numbers_joined());
    }
    println!("{}", "-".repeat(20));
}

fn render_results(groups: &[ResolvedGroup], results: &[DispatchResult]) {
    println!("----- RESULTS -----");
    for (group, result) in groups.iter().zip(results) {
        println!("{}:", group.name());
        println!("  phone numbers: {}", group.numbers_joined());
        match result {
            Ok(id) => println!("  result: {}", id),
            Err(error) => println!("  result: ERROR: {}", error),
        }
    }
}

/// Run the bulk send end to end.
///
/// The exit status is success only if the run was aborted cleanly or every
/// group's send succeeded; any per-group failure yields a failure status
/// after all groups were attempted and reported.
pub async fn run(args: Args) -> anyhow::Result<ExitCode> {
    if args.print_example {
        println!("{}", Roster::example_json());
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::from_env()?;
    tracing::debug!(
        variant = %config.api_variant,
        phone_format = %config.phone_format,
        "configuration loaded"
    );

    let recipients_path = args
        .recipients
        .as_deref()
        .context("--recipients is required")?;
    let roster = Roster::load(recipients_path)
        .with_context(|| format!("Failed to load {}", recipients_path.display()))?;
    let groups = resolve(&roster, config.phone_format)?;
    let message = load_message(&args)?;

    render_preview(&message, &groups);

    let stdin = io::stdin();
    if !confirm(&mut stdin.lock())? {
        println!("ABORT");
        return Ok(ExitCode::SUCCESS);
    }

    println!("sending...");
    let client = PushbulletClient::new(&config);
    let transport: Arc<dyn SmsTransport> = Arc::new(AsyncPushbulletTransport::new(client));
    let dispatcher = Dispatcher::new(transport);
    let results = dispatcher.dispatch(&message, &groups).await;

    render_results(&groups, &results);

    if results.iter().any(|result| result.is_err()) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
