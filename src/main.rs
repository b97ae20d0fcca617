//! Adapter Chat - terminal client for the universal adapter service
//!
//! Sends free-text requests to the adapter and renders its replies: plain
//! text, or structured provisioning results describing a deployed tool
//! server or a failed deployment with its retry history.

mod adapter;
mod config;
mod logging;
mod provision;
mod render;
mod runtime;
mod session;
mod transcript;
mod tui;

use adapter::{AdapterService, HttpAdapter, LoggingAdapter};
use clap::Parser;
use config::Cli;
use render::{render_answer, to_plain, RenderOptions};
use runtime::SessionHandle;
use std::sync::Arc;
use tokio::sync::oneshot;
use transcript::Answer;
use tui::{ServiceStatus, UiState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli.log_file();
    logging::init(&log_file)?;
    tracing::info!(
        endpoint = %cli.endpoint,
        log_file = %log_file.display(),
        "Starting adapter chat"
    );

    let http = HttpAdapter::new(cli.endpoint.clone())?;
    let adapter = Arc::new(LoggingAdapter::new(http));
    let (handle, runtime_task) = runtime::spawn(adapter.clone());

    let failed = if let Some(query) = cli.one_shot_query() {
        one_shot(&handle, query, cli.expand).await?
    } else {
        interactive(handle.clone(), adapter, cli.expand).await?;
        false
    };

    // A call still in flight has no timeout; don't wait for it
    runtime_task.abort();

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Submit one query and print its rendered answer. True when the call failed.
async fn one_shot(
    handle: &SessionHandle,
    query: String,
    expand_details: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let turn_id = handle.submit(query).await?;
    let snapshot = handle.wait_settled(turn_id).await?;
    let Some(turn) = snapshot.transcript.last() else {
        return Ok(true);
    };

    let options = RenderOptions {
        expand_details,
        show_timestamps: false,
    };
    println!("{}", to_plain(&render_answer(turn, options)));
    Ok(matches!(turn.answer(), Answer::ErrorText(_)))
}

async fn interactive<A: AdapterService + 'static>(
    handle: SessionHandle,
    adapter: Arc<A>,
    expand_details: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (probe_tx, probe_rx) = oneshot::channel();
    let state = UiState::new(adapter.endpoint(), expand_details);

    tokio::spawn(async move {
        let status = match adapter.probe().await {
            Ok(greeting) => ServiceStatus::Online(greeting),
            Err(e) => ServiceStatus::Unreachable(e.reason().to_string()),
        };
        // The interface may already be gone
        let _ = probe_tx.send(status);
    });

    tui::run(handle, state, probe_rx).await?;
    Ok(())
}
