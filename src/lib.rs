//! unisearch: University data search
//!
//! Terminal UI for filtering a fixed set of university schemas. The binary
//! either starts the interactive TUI or, with `--headless`, runs one search
//! and prints the results. This crate exposes the headless layer so that
//! integration tests and benches can import it directly; the core engine
//! lives in `unisearch-core` and the UI in `unisearch-tui`.
//!
//! # Architecture
//!
//! ```text
//! Dataset ──► Search ──► Worker ──► TUI
//!                │
//!                └──► Headless (table / jsonl / csv)
//! ```

pub mod headless;

pub use headless::{write_results, OutputFormat};
