//! Headless mode: run one search and print the results to stdout.
//!
//! Three formats are supported:
//!
//! - `table`: header row plus one row per record, columns padded and
//!   separated by two spaces. Zero results prints `No results found.`.
//! - `jsonl`: one JSON object per record with typed values.
//! - `csv`: header row then records, quoting values that need it.
//!
//! All three formats share one column set: the first result record's field
//! names. Values are looked up by name, so records listing their fields in a
//! different order still line up. `jsonl` and `csv` print nothing at all for
//! zero results so that scripts can count lines.

use std::{io::Write, time::Duration};
use unisearch_core::{search_after, Dataset, SchemaName, SearchResults, EMPTY_MESSAGE};

const COLUMN_GAP: &str = "  ";

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Jsonl,
    Csv,
}

/// Wait out the loading delay, search, and write the results to `out`.
pub async fn run(
    dataset: &Dataset,
    schema: SchemaName,
    query: &str,
    delay: Duration,
    format: OutputFormat,
    out: impl Write,
) -> anyhow::Result<()> {
    tracing::info!(%schema, query, ?format, "headless search");
    let results = search_after(dataset, schema, query, delay).await;
    write_results(&results, format, out)
}

/// Serialize `results` to `out` in the requested format.
///
/// Columns come from [`SearchResults::columns`]. In `table` and `csv` a
/// field missing from a record is an empty cell; in `jsonl` it is omitted,
/// and fields outside the column set are dropped.
pub fn write_results(
    results: &SearchResults,
    format: OutputFormat,
    mut out: impl Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => write_table(results, &mut out)?,
        OutputFormat::Jsonl => write_jsonl(results, &mut out)?,
        OutputFormat::Csv => write_csv(results, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn write_table(results: &SearchResults, out: &mut impl Write) -> anyhow::Result<()> {
    if results.is_empty() {
        writeln!(out, "{EMPTY_MESSAGE}")?;
        return Ok(());
    }

    let columns = results.columns();
    let rows: Vec<Vec<String>> = results.records.iter().map(|r| r.render_columns(&columns)).collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn write_jsonl(results: &SearchResults, out: &mut impl Write) -> anyhow::Result<()> {
    let columns = results.columns();
    for record in &results.records {
        serde_json::to_writer(&mut *out, &record.project(&columns))?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_csv(results: &SearchResults, out: &mut impl Write) -> anyhow::Result<()> {
    if results.is_empty() {
        return Ok(());
    }

    let columns = results.columns();
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(&mut *out);
    writer.write_record(&columns)?;
    for record in &results.records {
        writer.write_record(record.render_columns(&columns))?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
