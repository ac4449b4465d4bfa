//! # Verdoc
//!
//! Replays application port messages against headless editors and prints
//! what each editor ends up showing.
//!
//! ## Quick Start
//!
//! ```bash
//! # Replay a message file
//! cargo run -- messages.json
//!
//! # Read messages from stdin, keep state in a file
//! cat messages.json | cargo run -- --storage state.json
//! ```
//!
//! The input is a JSON array of port messages:
//!
//! ```json
//! [{"port": "renderCodeEditors", "value": [{"tagId": "x", "language": "Go",
//!   "content": ["a", "b"], "startLineNumber": 10, "greenLineRanges": [[11, 11]]}]}]
//! ```

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast::error::TryRecvError;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verdoc_core::{BridgeEvent, Bridge, Config, PortMessage};
use verdoc_persist::{FileStorage, MemoryStorage, StatePersistence, Storage};
use verdoc_widget::{Document, HeadlessFactory, WidgetSnapshot};

/// Verdoc - render annotated code snippets headlessly
#[derive(Parser, Debug)]
#[command(name = "verdoc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file of port messages (stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File to keep saved application state in
    #[arg(short, long, value_name = "FILE")]
    storage: Option<PathBuf>,

    /// Draw every message on one frame instead of one frame per message
    #[arg(long)]
    burst: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// What gets printed.
#[derive(Serialize)]
struct Report {
    editors: BTreeMap<String, WidgetSnapshot>,
    events: Vec<BridgeEvent>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        // RUST_LOG directives win over -v.
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(log_level).into())
                .from_env_lossy(),
        )
        .init();

    tracing::info!("Starting Verdoc v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    let messages = read_messages(args.input.as_deref())?;
    tracing::info!("Replaying {} message(s)", messages.len());

    let storage: Box<dyn Storage> = match args.storage.or_else(|| config.storage.path.clone()) {
        Some(path) => Box::new(FileStorage::new(path)),
        None => Box::new(MemoryStorage::new()),
    };
    let store = StatePersistence::with_key(storage, config.storage.key.clone());

    let factory = HeadlessFactory::new(config.render.gutter_config());
    let mut bridge = Bridge::new(factory, store, document_for(&messages), &config);
    let mut events = bridge.subscribe();

    if args.burst {
        let (tx, rx) = tokio::sync::mpsc::channel(messages.len().max(1));
        for message in messages {
            tx.send(message).await?;
        }
        drop(tx);
        bridge.run(rx).await;
    } else {
        for message in messages {
            if let Err(err) = bridge.handle(message) {
                tracing::warn!("Port message failed: {}", err);
            }
            bridge.run_frame();
        }
    }

    let viewport = config.render.viewport();
    let editors = bridge
        .presenter()
        .registry()
        .iter()
        .map(|(tag, widget)| (tag.to_string(), widget.snapshot(viewport)))
        .collect();

    let mut report = Report {
        editors,
        events: Vec::new(),
    };
    loop {
        match events.try_recv() {
            Ok(event) => report.events.push(event),
            Err(TryRecvError::Lagged(n)) => tracing::warn!("Missed {} event(s)", n),
            Err(_) => break,
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Reads port messages from `path`, or stdin.
fn read_messages(path: Option<&Path>) -> anyhow::Result<Vec<PortMessage>> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            content
        }
    };
    serde_json::from_str(&content).context("Invalid port messages")
}

/// A page with a host container for every editor the messages mention.
fn document_for(messages: &[PortMessage]) -> Document {
    let mut document = Document::new();
    for tag in messages.iter().flat_map(PortMessage::tags) {
        let element_id = tag.element_id();
        if document.container(&element_id).is_none() {
            document.insert_container(element_id);
        }
    }
    document
}
