//! unisearch-core: university data search core library.
//!
//! This crate holds everything below the UI: the data model, the builtin
//! dataset, the search engine, the delayed search worker, and configuration.
//!
//! # Architecture
//!
//! ```text
//! Dataset ──► Search ──► Worker ──► UI
//!                 │
//!                 └──► Headless output
//! ```
//!
//! The worker hands results to the UI over a `tokio` channel. The UI drives
//! the main thread; delayed searches run on background tasks.

pub mod config;
pub mod dataset;
pub mod error;
pub mod search;
pub mod types;
pub mod worker;

pub use dataset::Dataset;
pub use error::{DatasetError, SchemaError};
pub use search::{record_matches, search, SearchResults, EMPTY_MESSAGE};
pub use types::{Record, Scalar, SchemaName};
pub use worker::{search_after, SearchOutcome, SearchWorker};
