//! unisearch TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, AppOptions};

/// Start the interactive TUI. Blocks until the user quits.
///
/// Delayed searches run on a small tokio runtime owned by this call; the
/// terminal loop itself stays on the calling thread.
pub fn run(options: AppOptions) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("unisearch-worker")
        .enable_time()
        .build()?;

    tracing::info!(
        schema = %options.schema,
        delay_ms = options.delay.as_millis() as u64,
        "starting tui"
    );
    App::new(options, runtime.handle().clone()).run()
}
