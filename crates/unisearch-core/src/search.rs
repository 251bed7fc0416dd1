//! Search layer: case-insensitive substring filter over one schema.
//!
//! [`search`] is pure and total: an absent schema yields no records, an empty
//! query yields every record, and otherwise a record is kept when any of its
//! rendered field values contains the query. Case folding is ASCII-only and
//! the query is not trimmed.

use crate::{
    dataset::Dataset,
    types::{Record, SchemaName},
};

/// Shown in place of a table when a search matches nothing.
pub const EMPTY_MESSAGE: &str = "No results found.";

/// Return the records of `schema` matching `query`, in dataset order.
pub fn search<'a>(dataset: &'a Dataset, schema: SchemaName, query: &str) -> Vec<&'a Record> {
    let Some(records) = dataset.records(schema) else {
        return Vec::new();
    };

    if query.is_empty() {
        return records.iter().collect();
    }

    let folded = query.to_ascii_lowercase();
    records
        .iter()
        .filter(|record| record_matches(record, &folded))
        .collect()
}

/// True when any field of `record`, rendered and lowercased, contains
/// `folded_query`. The caller lowercases the query once up front.
pub fn record_matches(record: &Record, folded_query: &str) -> bool {
    record
        .values()
        .any(|value| value.render().to_ascii_lowercase().contains(folded_query))
}

// ---------------------------------------------------------------------------
// SearchResults
// ---------------------------------------------------------------------------

/// Owned output of one search, ready for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    pub schema: SchemaName,
    pub query: String,
    pub records: Vec<Record>,
}

impl SearchResults {
    /// Run [`search`] and take owned copies of the matches.
    pub fn run(dataset: &Dataset, schema: SchemaName, query: &str) -> Self {
        let records: Vec<Record> = search(dataset, schema, query)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(%schema, query, hits = records.len(), "search complete");
        Self {
            schema,
            query: query.to_string(),
            records,
        }
    }

    /// Column headers: the first record's field names in insertion order.
    /// Empty when there are no results.
    pub fn columns(&self) -> Vec<&str> {
        self.records
            .first()
            .map(|r| r.field_names().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
