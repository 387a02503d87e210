//! Dungeon text client binary.
//!
//! Main entry point for the dungeon simulation.
//!
//! # Architecture
//!
//! This binary is the composition root that assembles:
//! 1. Content (levels, portals, monsters) via `ContentFactory`
//! 2. Runtime (turn worker and broadcast) via `RuntimeBuilder`
//! 3. Text clients: one printer task per registered client plus a stdin reader
//!
//! # Examples
//!
//! ```bash
//! # Two windows, frames dropped for whichever falls behind
//! DUNGEON_CLIENTS=2 DUNGEON_BROADCAST_POLICY=drop cargo run -p dungeon-client
//! ```

use std::io::BufRead;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;

use dungeon_client::{ClientConfig, logging, parse_line, render_frame};
use game_content::ContentFactory;
use game_core::LevelSnapshot;
use runtime::{ClientConnection, ClientId, Input, Runtime, RuntimeHandle, Termination};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let _log_guard = logging::setup_logging(&config)?;
    tracing::info!("Starting dungeon client");
    tracing::info!("Content directory: {}", config.content_dir.display());
    tracing::info!("Broadcast policy: {}", config.runtime.broadcast_policy);

    // 3. Load content
    let content = ContentFactory::new(&config.content_dir)
        .load()
        .with_context(|| format!("Failed to load content from {}", config.content_dir.display()))?;

    // 4. Build runtime and register clients
    let mut runtime = Runtime::builder()
        .config(config.runtime.clone())
        .world(content.world)
        .build()?;
    let printers: Vec<JoinHandle<()>> = (0..config.clients)
        .map(|_| spawn_printer(runtime.add_client()))
        .collect();

    // 5. Start and feed input until the run ends
    let running = runtime.start()?;
    spawn_reader(running.handle());

    let termination = running.wait().await?;
    join_printers(printers).await;

    tracing::info!("Client shutdown complete: {}", termination);
    println!("{}", farewell(&termination));
    Ok(())
}

/// Prints every frame a client receives until its channel closes.
fn spawn_printer(connection: ClientConnection) -> JoinHandle<()> {
    let ClientConnection { id, mut snapshots, .. } = connection;
    tokio::spawn(async move {
        while let Some(snapshot) = snapshots.recv().await {
            print_frame(id, &snapshot);
        }
        tracing::debug!(client = %id, "printer finished");
    })
}

/// Waits for every printer, logging the ones that panicked. Returns how many
/// failed.
async fn join_printers(printers: Vec<JoinHandle<()>>) -> usize {
    let mut failed = 0;
    for printer in printers {
        if let Err(e) = printer.await {
            tracing::warn!("Printer task failed: {}", e);
            failed += 1;
        }
    }
    failed
}

fn print_frame(id: ClientId, snapshot: &Arc<LevelSnapshot>) {
    println!("== {id} ==");
    print!("{}", render_frame(snapshot));
}

/// Forwards stdin lines as inputs from a plain thread, so a pending read
/// never holds up shutdown. End of input quits the game.
fn spawn_reader(handle: RuntimeHandle) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    break;
                }
            };
            for input in parse_line(&line) {
                if handle.blocking_send(input).is_err() {
                    return;
                }
            }
        }
        let _ = handle.blocking_send(Input::QuitGame);
    });
}

fn farewell(termination: &Termination) -> String {
    match termination {
        Termination::Quit => "Goodbye.".to_string(),
        Termination::NoClients => "All windows closed.".to_string(),
        Termination::PlayerDied { killer, hp } => {
            format!("You were killed by {killer} ({hp} HP). Game over.")
        }
        Termination::InputClosed => "Input closed.".to_string(),
    }
}
