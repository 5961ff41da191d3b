//! Invitation launcher - headless entry point.
//!
//! Loads configuration, seeds in-memory data sources, and drives the shell
//! from line commands on stdin. Type `help` for the command list.

use std::sync::Arc;
use std::time::Duration;

use invite_core::{load_or_default, InviteConfig};
use invite_shell::{parse_command, Command, Host};
use invite_store::{DocumentStore, MemoryDocumentStore, MemoryObjectStore, GUESTBOOK_COLLECTION};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// How often closing windows and toasts are advanced.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

// =============================================================================
// Demo Data
// =============================================================================

fn seed_gallery(config: &InviteConfig) -> MemoryObjectStore {
    let store = MemoryObjectStore::new("https://storage.example/v0/b/invite/o");
    for i in 1..=12 {
        store.put(format!("{}{}.jpg", config.gallery.prefix, i));
    }
    store
}

async fn seed_guestbook(store: &MemoryDocumentStore) {
    let welcome = json!({
        "name": "Siwoo & Jini",
        "content": "Thank you for visiting. Leave us a message!",
    });
    if let Err(e) = store.insert(GUESTBOOK_COLLECTION, welcome).await {
        tracing::warn!("Failed to seed guestbook: {}", e);
    }
}

// =============================================================================
// Event Loop
// =============================================================================

async fn run(config: InviteConfig) -> Result<(), String> {
    let objects = seed_gallery(&config);
    let documents = MemoryDocumentStore::new();
    seed_guestbook(&documents).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut host = Host::new(config, Arc::new(objects), Arc::new(documents), tx)
        .map_err(|e| format!("Failed to open guestbook: {}", e))?;
    tracing::info!("Shell ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    println!("{}", host.status(Instant::now()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => return Err(format!("Failed to read stdin: {}", e)),
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => println!("{}", host.execute(command, Instant::now())),
                    Err(e) => println!("{} (try `help`)", e),
                }
            }
            Some(event) = rx.recv() => {
                tracing::debug!("Shell event: {:?}", event);
                host.handle_event(event);
            }
            now = ticker.tick() => {
                host.tick(now);
            }
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Invitation launcher starting...");

    let config = load_or_default();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run(config)) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
