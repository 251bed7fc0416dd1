use anyhow::Context;
use clap::Parser;
use std::{path::PathBuf, sync::Arc, time::Duration};
use unisearch::headless::{self, OutputFormat};
use unisearch_core::{config::Config, Dataset, SchemaName};
use unisearch_tui::AppOptions;

#[derive(Parser)]
#[command(name = "unisearch", about = "University Information Search — filter university data schemas")]
struct Cli {
    /// Write debug logs to /tmp/unisearch-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Schema to search (default from config, else Classroom).
    #[arg(long)]
    schema: Option<SchemaName>,

    /// Initial search query.
    #[arg(long, default_value = "")]
    query: String,

    /// Load the dataset from a JSON file instead of the builtin data.
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Simulated loading delay in milliseconds (default from config).
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Print results to stdout and exit instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Headless output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/unisearch-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("unisearch debug log started — tail -f /tmp/unisearch-debug.log");
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config load failed, using defaults");
        Config::defaults()
    });

    let dataset = match &cli.data {
        Some(path) => Arc::new(
            Dataset::load(path)
                .with_context(|| format!("failed to load dataset from {}", path.display()))?,
        ),
        None => Dataset::builtin(),
    };

    let schema = cli.schema.unwrap_or(config.search.default_schema);
    let delay = cli
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.search.loading_delay());

    if cli.headless {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let stdout = std::io::stdout().lock();
        return runtime.block_on(headless::run(
            &dataset,
            schema,
            &cli.query,
            delay,
            cli.format,
            stdout,
        ));
    }

    unisearch_tui::run(AppOptions {
        dataset,
        schema,
        query: cli.query,
        delay,
        config,
    })
}
