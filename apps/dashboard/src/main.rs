use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    ControlKind, Dashboard, Dispatched, HeadlessSurface, HttpRoverProvider, SelectionOutcome,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Renders the rover dashboard headlessly, replaying the given clicks in order:
/// every `--toggle` first, then every `--select`.
#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the rover proxy server.
    #[arg(long, default_value = "http://localhost:3000")]
    server_url: String,
    /// Filter label to toggle, e.g. "Most recent photos". Repeatable.
    #[arg(long = "toggle")]
    toggles: Vec<String>,
    /// Rover card to click, e.g. "Curiosity". Repeatable.
    #[arg(long = "select")]
    selections: Vec<String>,
    /// Write the final markup here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    // Single execution thread; selections are tasks interleaved on it.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build dashboard runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: Args) -> Result<()> {
    let provider = HttpRoverProvider::new(&args.server_url)
        .with_context(|| format!("invalid --server-url '{}'", args.server_url))?;
    let dashboard = Arc::new(Dashboard::new(provider, HeadlessSurface::new()));
    dashboard.on_ready();

    for label in &args.toggles {
        match dashboard.click(ControlKind::FilterToggle, label) {
            Some(_) => info!(label = %label, "filter toggled"),
            None => warn!(label = %label, "no filter button with this label"),
        }
    }

    let mut tasks = Vec::new();
    for name in &args.selections {
        match dashboard.click(ControlKind::RoverSelector, name) {
            Some(Dispatched::Selection(task)) => tasks.push((name.clone(), task)),
            _ => warn!(rover = %name, "no rover card with this name"),
        }
    }
    for (name, task) in tasks {
        match task.await.context("selection task panicked")? {
            SelectionOutcome::PhotosReceived { count } => {
                info!(rover = %name, count, "selection complete")
            }
            outcome => warn!(rover = %name, ?outcome, "selection incomplete"),
        }
    }

    let (content, paints) = dashboard.with_surface(|s| (s.content().to_string(), s.paints()));
    info!(paints, "dashboard rendered");
    match &args.output {
        Some(path) => fs::write(path, &content)
            .with_context(|| format!("failed to write markup to '{}'", path.display()))?,
        None => println!("{content}"),
    }
    Ok(())
}
