use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use bucket_index_lambda::adapters::memory::InMemoryIndexStore;
use bucket_index_lambda::handlers::dispatcher::handle_notification_event;
use bucket_index_lambda::handlers::recorder::Recorder;
use bucket_index_lambda::telemetry::init_tracing;
use clap::Parser;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(
    name = "replay_event",
    about = "Replay a captured bucket notification event against an in-memory index table"
)]
struct Cli {
    /// Path to the notification event JSON file
    #[arg(long, env = "REPLAY_EVENT_PATH")]
    event: PathBuf,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing(false);
    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.event)
        .map_err(|error| format!("failed to read {}: {error}", cli.event.display()))?;
    let event: Value = serde_json::from_str(&raw)
        .map_err(|error| format!("invalid event JSON in {}: {error}", cli.event.display()))?;

    let recorder = Recorder::new(InMemoryIndexStore::new());
    let response = handle_notification_event(event, &recorder).await;
    let succeeded = response.status_code == 200;

    let report = json!({
        "response": response,
        "table": recorder.store().items(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
