use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use conflux_sources::default_sources;
use conflux_store::ConferenceStore;

mod config;

/// Aggregate academic-conference metadata from multiple upstream sources
/// into one canonical JSON dataset.
#[derive(Parser)]
#[command(name = "conflux", version)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the serialized dataset (overrides config).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Previous run's artifact to re-import (overrides config).
    #[arg(long)]
    own_data: Option<PathBuf>,

    /// Log errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("conflux error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = config::ConfluxConfig::load(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    if let Some(own_data) = cli.own_data {
        config.sources.own.path = own_data;
    }

    let mut store = ConferenceStore::new();
    let sources = default_sources(&config.sources_config());

    // A failing source contributes nothing this run; it never stops the
    // others. All initial passes run before any additional pass, because
    // enrichment sources assume primary records already exist.
    for source in &sources {
        tracing::info!(source = source.name(), "initial load");
        if let Err(error) = source.initial_load(&mut store).await {
            tracing::error!(source = source.name(), %error, "initial load failed");
        }
    }
    for source in &sources {
        tracing::info!(source = source.name(), "additional load");
        if let Err(error) = source.additional_load(&mut store).await {
            tracing::error!(source = source.name(), %error, "additional load failed");
        }
    }

    tracing::info!(series = store.len(), "writing dataset");
    let json = store.serialize().context("failed to serialize the dataset")?;
    if let Some(parent) = config.output.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    std::fs::write(&config.output.path, json)
        .with_context(|| format!("failed to write {}", config.output.path.display()))?;

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CONFLUX_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
