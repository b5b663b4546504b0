//! Listen command implementation
//!
//! Reads newline-delimited JSON messages from stdin or a file and hands each
//! one to the [`MessageDispatcher`]. Each message runs in its own task; on
//! end of input or a shutdown signal the command stops reading and waits for
//! the tasks still in flight.

use crate::cli::commands::build_pipeline;
use crate::config::load_config;
use crate::core::context::{SystemPrincipal, SystemToken};
use crate::core::dispatch::Delivery;
use crate::core::listener::MessageDispatcher;
use crate::domain::InboundMessage;
use clap::Args;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

/// Arguments for the listen command
#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Read messages from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<String>,

    /// Dry run mode - log registry requests instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Seconds to wait for in-flight messages after input ends
    #[arg(long, default_value_t = 30)]
    pub shutdown_timeout_secs: u64,
}

/// Counters for one listen run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListenSummary {
    /// Non-blank lines read
    pub received: usize,
    /// Lines that were not a valid message
    pub malformed: usize,
    /// Messages dropped before a task was started
    pub ignored: usize,
    /// Messages handed to a task
    pub dispatched: usize,
    /// Tasks that ended with the registry accepting the patient
    pub delivered: usize,
    /// Tasks that ended with a tolerated create format rejection
    pub tolerated: usize,
    /// Tasks that ended in an error
    pub failed: usize,
    /// Tasks still running when the shutdown timeout expired
    pub abandoned: usize,
}

impl ListenSummary {
    fn record(&mut self, outcome: std::result::Result<Option<Delivery>, JoinError>) {
        match outcome {
            Ok(Some(Delivery::Delivered)) => self.delivered += 1,
            Ok(Some(Delivery::FormatRejectionTolerated)) => self.tolerated += 1,
            Ok(None) => self.failed += 1,
            Err(e) => {
                tracing::error!(error = %e, "Message task did not complete");
                self.failed += 1;
            }
        }
    }

    fn completed(&self) -> usize {
        self.delivered + self.tolerated + self.failed
    }
}

impl ListenArgs {
    /// Execute the listen command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting listen command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let pipeline = match build_pipeline(&config, self.dry_run) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build sync pipeline");
                eprintln!("Failed to initialize: {e}");
                return Ok(2);
            }
        };

        let dispatcher = MessageDispatcher::new(pipeline, &config.messaging.update_destination);
        dispatcher.set_system_token(SystemToken::issue(SystemPrincipal::from_config(
            &config.source,
        )));

        let timeout = Duration::from_secs(self.shutdown_timeout_secs);
        let summary = match &self.input {
            Some(path) => {
                let file = tokio::fs::File::open(path).await?;
                tracing::info!(input = %path, "Reading messages from file");
                listen(&dispatcher, BufReader::new(file), shutdown_signal, timeout).await?
            }
            None => {
                tracing::info!("Reading messages from stdin");
                let stdin = BufReader::new(tokio::io::stdin());
                listen(&dispatcher, stdin, shutdown_signal, timeout).await?
            }
        };

        println!("Listener stopped");
        println!("  Received:   {}", summary.received);
        println!("  Malformed:  {}", summary.malformed);
        println!("  Ignored:    {}", summary.ignored);
        println!("  Delivered:  {}", summary.delivered);
        println!("  Tolerated:  {}", summary.tolerated);
        println!("  Failed:     {}", summary.failed);
        if summary.abandoned > 0 {
            println!("  Abandoned:  {}", summary.abandoned);
        }

        Ok(0)
    }
}

/// Feeds every line of `reader` to the dispatcher until end of input or
/// shutdown, then waits up to `drain_timeout` for in-flight tasks
///
/// # Errors
///
/// Returns an error only if reading the input fails.
pub async fn listen<R>(
    dispatcher: &MessageDispatcher,
    reader: R,
    mut shutdown_signal: watch::Receiver<bool>,
    drain_timeout: Duration,
) -> std::io::Result<ListenSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = ListenSummary::default();
    let mut in_flight: Vec<JoinHandle<Option<Delivery>>> = Vec::new();
    let mut lines = reader.lines();
    let mut signal_open = true;

    while !*shutdown_signal.borrow() {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            changed = shutdown_signal.changed(), if signal_open => {
                if changed.is_err() {
                    signal_open = false;
                }
                continue;
            }
        };

        let Some(line) = line else {
            tracing::info!("End of input");
            break;
        };

        if line.trim().is_empty() {
            continue;
        }
        summary.received += 1;

        let message = match InboundMessage::from_json_line(&line) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed message");
                summary.malformed += 1;
                continue;
            }
        };

        match dispatcher.on_message(message) {
            Some(handle) => {
                summary.dispatched += 1;
                in_flight.push(handle);
            }
            None => summary.ignored += 1,
        }

        reap_finished(&mut in_flight, &mut summary).await;
    }

    if *shutdown_signal.borrow() {
        tracing::info!(in_flight = in_flight.len(), "Shutdown requested, draining");
    }

    let drained = tokio::time::timeout(drain_timeout, async {
        while let Some(handle) = in_flight.last_mut() {
            let outcome = handle.await;
            in_flight.pop();
            summary.record(outcome);
        }
    })
    .await;

    if drained.is_err() {
        for handle in in_flight.drain(..) {
            handle.abort();
        }
        summary.abandoned = summary.dispatched - summary.completed();
        tracing::warn!(
            abandoned = summary.abandoned,
            "Shutdown timeout expired with messages still in flight"
        );
    }

    tracing::info!(
        received = summary.received,
        delivered = summary.delivered,
        tolerated = summary.tolerated,
        failed = summary.failed,
        "Listener stopped"
    );

    Ok(summary)
}

async fn reap_finished(
    in_flight: &mut Vec<JoinHandle<Option<Delivery>>>,
    summary: &mut ListenSummary,
) {
    let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(in_flight)
        .into_iter()
        .partition(|h| h.is_finished());
    *in_flight = running;
    for handle in finished {
        summary.record(handle.await);
    }
}
