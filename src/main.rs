//! cadastro-bot - chat-driven contact intake
//!
//! Collects numero/nome/email per conversation from operator cue phrases
//! and appends completed records to an xlsx workbook. The real messaging
//! transport is an external collaborator; this binary consumes one JSON
//! message event per stdin line in its place.

mod dispatch;
mod runtime;
mod sheet;
mod state_machine;
mod store;

use runtime::{IntakeRuntime, SheetSink};
use sheet::{SheetStore, SHEET_FILE_NAME};
use state_machine::MessageEvent;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadastro_bot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let sheet_path =
        std::env::var("CADASTRO_SHEET_PATH").unwrap_or_else(|_| SHEET_FILE_NAME.to_string());
    tracing::info!(path = %sheet_path, "using workbook");

    let (event_tx, event_rx) = mpsc::channel(32);
    let sink = SheetSink::new(SheetStore::new(&sheet_path));
    let runtime_task = tokio::spawn(IntakeRuntime::new(sink, event_rx).run());

    // Transport stand-in: one JSON-encoded message event per line.
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<MessageEvent>(&line) {
            Ok(event) => {
                if event_tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(err) => tracing::warn!(error = %err, "ignoring malformed event line"),
        }
    }

    // Closing the channel lets the runtime drain and stop.
    drop(event_tx);
    runtime_task.await?;
    Ok(())
}
