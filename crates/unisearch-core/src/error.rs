//! Error types for unisearch-core.
//!
//! Searching never fails. Errors only arise at the edges: parsing a schema
//! name typed by the user and loading a dataset file.

use std::path::PathBuf;

/// A schema name that is not one of the eleven fixed schemas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("unknown schema: {0:?}")]
    UnknownSchema(String),
}

/// Failure to load a dataset file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownSchema(#[from] SchemaError),
}
