//! Delayed search worker: the `Idle → Searching → Idle` loading cycle.
//!
//! Every [`SearchWorker::submit`] aborts the in-flight task, bumps the
//! generation, and spawns a task that sleeps for the loading delay before
//! running the search. Outcomes travel back over a tokio channel; the UI
//! thread polls [`SearchWorker::try_next`] each frame and only ever sees the
//! outcome of the latest submission.

use crate::{dataset::Dataset, search::SearchResults, types::SchemaName};
use std::{sync::Arc, time::Duration};
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

/// Monotonic id of a submitted search.
pub type Generation = u64;

/// A completed search tagged with the submission that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub generation: Generation,
    pub results: SearchResults,
}

/// Sleep for `delay`, then search. The single-shot form of the worker.
pub async fn search_after(
    dataset: &Dataset,
    schema: SchemaName,
    query: &str,
    delay: Duration,
) -> SearchResults {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    SearchResults::run(dataset, schema, query)
}

pub struct SearchWorker {
    dataset: Arc<Dataset>,
    delay: Duration,
    handle: Handle,
    tx: UnboundedSender<SearchOutcome>,
    rx: UnboundedReceiver<SearchOutcome>,
    generation: Generation,
    in_flight: Option<JoinHandle<()>>,
    searching: bool,
}

impl SearchWorker {
    /// Create a worker that spawns its tasks on `handle`.
    pub fn new(dataset: Arc<Dataset>, delay: Duration, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            dataset,
            delay,
            handle,
            tx,
            rx,
            generation: 0,
            in_flight: None,
            searching: false,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the loading delay. Takes effect from the next submission.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Generation of the most recent submission (0 before the first).
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// True between a submission and the delivery of its outcome.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Start a new search, superseding any in-flight one.
    pub fn submit(&mut self, schema: SchemaName, query: impl Into<String>) -> Generation {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }

        self.generation += 1;
        self.searching = true;

        let generation = self.generation;
        let query = query.into();
        let dataset = Arc::clone(&self.dataset);
        let delay = self.delay;
        let tx = self.tx.clone();

        tracing::debug!(generation, %schema, query = %query, ?delay, "search submitted");

        self.in_flight = Some(self.handle.spawn(async move {
            let results = search_after(&dataset, schema, &query, delay).await;
            // Receiver lives as long as the worker; a send error means shutdown.
            let _ = tx.send(SearchOutcome {
                generation,
                results,
            });
        }));

        generation
    }

    /// Drain delivered outcomes and return the current one, if it has arrived.
    ///
    /// Outcomes from superseded submissions are dropped.
    pub fn try_next(&mut self) -> Option<SearchOutcome> {
        let mut latest = None;
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.generation == self.generation {
                latest = Some(outcome);
            } else {
                tracing::debug!(
                    stale = outcome.generation,
                    current = self.generation,
                    "dropping stale search outcome"
                );
            }
        }
        if latest.is_some() {
            self.searching = false;
            self.in_flight = None;
        }
        latest
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::from_tables([(
            SchemaName::Advisor,
            vec![
                Record::new().with("sID", "S001").with("iID", "I001"),
                Record::new().with("sID", "S002").with("iID", "I002"),
            ],
        )]))
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn outcome_arrives_after_delay() {
        let mut worker =
            SearchWorker::new(dataset(), Duration::from_millis(1000), Handle::current());
        let generation = worker.submit(SchemaName::Advisor, "s002");
        settle().await;
        assert!(worker.is_searching());

        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        assert!(worker.try_next().is_none());
        assert!(worker.is_searching());

        tokio::time::advance(Duration::from_millis(600)).await;
        settle().await;
        let outcome = worker.try_next().expect("outcome after delay");
        assert_eq!(outcome.generation, generation);
        assert_eq!(outcome.results.len(), 1);
        assert!(!worker.is_searching());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_submission_supersedes_older() {
        let mut worker =
            SearchWorker::new(dataset(), Duration::from_millis(100), Handle::current());
        worker.submit(SchemaName::Advisor, "s001");
        let latest = worker.submit(SchemaName::Advisor, "");
        settle().await;

        tokio::time::advance(Duration::from_millis(200)).await;
        settle().await;
        let outcome = worker.try_next().expect("latest outcome");
        assert_eq!(outcome.generation, latest);
        assert_eq!(outcome.results.query, "");
        assert_eq!(outcome.results.len(), 2);
        assert!(worker.try_next().is_none());
    }

    #[tokio::test]
    async fn zero_delay_delivers_promptly() {
        let mut worker = SearchWorker::new(dataset(), Duration::ZERO, Handle::current());
        worker.submit(SchemaName::Course, "");
        settle().await;
        let outcome = worker.try_next().expect("immediate outcome");
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.results.schema, SchemaName::Course);
    }

    #[tokio::test(start_paused = true)]
    async fn search_after_waits_then_searches() {
        let ds = dataset();
        let start = tokio::time::Instant::now();
        let results = search_after(&ds, SchemaName::Advisor, "I002", Duration::from_secs(1)).await;
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert_eq!(results.len(), 1);
    }
}
