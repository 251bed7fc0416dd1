//! Test builders: ergonomic constructors for `Record` and `Dataset`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::path::PathBuf;
use unisearch_core::{Dataset, Record, SchemaName};

// ---------------------------------------------------------------------------
// DatasetBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for small [`Dataset`] fixtures.
///
/// # Example
///
/// ```rust
/// let dataset = DatasetBuilder::new()
///     .table(SchemaName::Course, vec![course("CS101", "Intro to CS", "Computer Science", 4)])
///     .build();
/// ```
#[derive(Default)]
pub struct DatasetBuilder {
    tables: Vec<(SchemaName, Vec<Record>)>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, schema: SchemaName, records: Vec<Record>) -> Self {
        self.tables.push((schema, records));
        self
    }

    pub fn build(self) -> Dataset {
        Dataset::from_tables(self.tables)
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Build a Course record.
pub fn course(course_id: &str, title: &str, dept_name: &str, credits: i64) -> Record {
    Record::new()
        .with("courseId", course_id)
        .with("title", title)
        .with("deptName", dept_name)
        .with("credits", credits)
}

/// Build a Classroom record.
pub fn classroom(building: &str, room_number: &str, capacity: i64) -> Record {
    Record::new()
        .with("building", building)
        .with("roomNumber", room_number)
        .with("capacity", capacity)
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Write `contents` to `name` inside a fresh temp directory. The directory is
/// returned so it outlives the test body.
pub fn write_temp_file(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write temp file");
    (dir, path)
}
