//! Dataset store: the fixed mapping from [`SchemaName`] to its records.
//!
//! The builtin dataset is built once on first use and shared as an
//! `Arc<Dataset>` for the rest of the process. A dataset can also be read
//! from a JSON document with the same shape (see [`Dataset::from_json_str`]).
//! Nothing mutates a dataset after construction.

use crate::{
    error::DatasetError,
    types::{Record, SchemaName},
};
use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
    sync::{Arc, LazyLock},
};

/// Read-only mapping from schema to its ordered records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    tables: BTreeMap<SchemaName, Vec<Record>>,
}

impl Dataset {
    /// Build a dataset from `(schema, records)` pairs. A repeated schema
    /// replaces the earlier entry.
    pub fn from_tables(tables: impl IntoIterator<Item = (SchemaName, Vec<Record>)>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    /// The builtin university dataset, shared process-wide.
    pub fn builtin() -> Arc<Dataset> {
        Arc::clone(&BUILTIN)
    }

    /// Records for `schema` in declaration order, or `None` when the dataset
    /// has no table for it.
    pub fn records(&self, schema: SchemaName) -> Option<&[Record]> {
        self.tables.get(&schema).map(Vec::as_slice)
    }

    /// Schemas present in this dataset, in picker order.
    pub fn schemas(&self) -> impl Iterator<Item = SchemaName> + '_ {
        self.tables.keys().copied()
    }

    pub fn contains(&self, schema: SchemaName) -> bool {
        self.tables.contains_key(&schema)
    }

    /// Total number of records across all schemas.
    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a dataset from JSON shaped like `{"Course": [{...}, ...], ...}`.
    ///
    /// Schema keys are matched case-insensitively. An unknown key fails the
    /// whole load.
    pub fn from_json_str(src: &str) -> Result<Self, DatasetError> {
        let raw: HashMap<String, Vec<Record>> = serde_json::from_str(src)?;
        let mut tables = BTreeMap::new();
        for (name, records) in raw {
            let schema: SchemaName = name.parse()?;
            tables.insert(schema, records);
        }
        tracing::debug!(schemas = tables.len(), "dataset parsed");
        Ok(Self { tables })
    }

    /// Read and parse a dataset file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let src = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&src)?;
        tracing::info!(path = %path.display(), records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }
}

// ---------------------------------------------------------------------------
// Builtin data
// ---------------------------------------------------------------------------

static BUILTIN: LazyLock<Arc<Dataset>> = LazyLock::new(|| Arc::new(builtin_tables()));

macro_rules! record {
    ($($name:literal => $value:expr),* $(,)?) => {
        Record::new()$(.with($name, $value))*
    };
}

fn builtin_tables() -> Dataset {
    Dataset::from_tables([
        (
            SchemaName::Classroom,
            vec![
                record!{ "building" => "Main", "roomNumber" => "101", "capacity" => 30 },
                record!{ "building" => "Science", "roomNumber" => "202", "capacity" => 50 },
                record!{ "building" => "Arts", "roomNumber" => "301", "capacity" => 25 },
                record!{ "building" => "Engineering", "roomNumber" => "401", "capacity" => 40 },
                record!{ "building" => "Business", "roomNumber" => "501", "capacity" => 35 },
                record!{ "building" => "Law", "roomNumber" => "601", "capacity" => 45 },
                record!{ "building" => "Medicine", "roomNumber" => "701", "capacity" => 55 },
                record!{ "building" => "Library", "roomNumber" => "801", "capacity" => 20 },
                record!{ "building" => "Gym", "roomNumber" => "901", "capacity" => 60 },
                record!{ "building" => "Dormitory", "roomNumber" => "1001", "capacity" => 100 },
            ],
        ),
        (
            SchemaName::Department,
            vec![
                record!{ "deptName" => "Computer Science", "building" => "Main", "budget" => 500000 },
                record!{ "deptName" => "Mathematics", "building" => "Science", "budget" => 300000 },
                record!{ "deptName" => "Physics", "building" => "Arts", "budget" => 400000 },
                record!{ "deptName" => "Engineering", "building" => "Engineering", "budget" => 600000 },
                record!{ "deptName" => "Business", "building" => "Business", "budget" => 450000 },
                record!{ "deptName" => "Law", "building" => "Law", "budget" => 350000 },
                record!{ "deptName" => "Medicine", "building" => "Medicine", "budget" => 700000 },
                record!{ "deptName" => "Library Science", "building" => "Library", "budget" => 200000 },
                record!{ "deptName" => "Physical Education", "building" => "Gym", "budget" => 250000 },
                record!{ "deptName" => "Residential Life", "building" => "Dormitory", "budget" => 150000 },
            ],
        ),
        (
            SchemaName::Course,
            vec![
                record!{ "courseId" => "CS101", "title" => "Introduction to Computer Science", "deptName" => "Computer Science", "credits" => 3 },
                record!{ "courseId" => "MATH101", "title" => "Calculus I", "deptName" => "Mathematics", "credits" => 4 },
                record!{ "courseId" => "PHYS101", "title" => "General Physics", "deptName" => "Physics", "credits" => 3 },
                record!{ "courseId" => "ENG101", "title" => "Introduction to Engineering", "deptName" => "Engineering", "credits" => 3 },
                record!{ "courseId" => "BUS101", "title" => "Introduction to Business", "deptName" => "Business", "credits" => 3 },
                record!{ "courseId" => "LAW101", "title" => "Introduction to Law", "deptName" => "Law", "credits" => 3 },
                record!{ "courseId" => "MED101", "title" => "Introduction to Medicine", "deptName" => "Medicine", "credits" => 3 },
                record!{ "courseId" => "LIB101", "title" => "Introduction to Library Science", "deptName" => "Library Science", "credits" => 3 },
                record!{ "courseId" => "PE101", "title" => "Introduction to Physical Education", "deptName" => "Physical Education", "credits" => 3 },
                record!{ "courseId" => "RL101", "title" => "Introduction to Residential Life", "deptName" => "Residential Life", "credits" => 3 },
            ],
        ),
        (
            SchemaName::Instructor,
            vec![
                record!{ "id" => "I001", "name" => "Alice Smith", "deptName" => "Computer Science", "salary" => 80000 },
                record!{ "id" => "I002", "name" => "Bob Johnson", "deptName" => "Mathematics", "salary" => 75000 },
                record!{ "id" => "I003", "name" => "Charlie Brown", "deptName" => "Physics", "salary" => 72000 },
                record!{ "id" => "I004", "name" => "Diana Prince", "deptName" => "Engineering", "salary" => 85000 },
                record!{ "id" => "I005", "name" => "Evan Davis", "deptName" => "Business", "salary" => 78000 },
                record!{ "id" => "I006", "name" => "Fiona Green", "deptName" => "Law", "salary" => 82000 },
                record!{ "id" => "I007", "name" => "George Harris", "deptName" => "Medicine", "salary" => 90000 },
                record!{ "id" => "I008", "name" => "Hannah White", "deptName" => "Library Science", "salary" => 70000 },
                record!{ "id" => "I009", "name" => "Ian Black", "deptName" => "Physical Education", "salary" => 65000 },
                record!{ "id" => "I010", "name" => "Jack Brown", "deptName" => "Residential Life", "salary" => 60000 },
            ],
        ),
        (
            SchemaName::Section,
            vec![
                record!{ "courseId" => "CS101", "secId" => "001", "semester" => "Fall", "year" => 2023, "building" => "Main", "roomNumber" => "101", "timeSlotId" => "T01" },
                record!{ "courseId" => "MATH101", "secId" => "001", "semester" => "Fall", "year" => 2023, "building" => "Science", "roomNumber" => "202", "timeSlotId" => "T02" },
                record!{ "courseId" => "PHYS101", "secId" => "001", "semester" => "Fall", "year" => 2023, "building" => "Arts", "roomNumber" => "301", "timeSlotId" => "T03" },
                record!{ "courseId" => "ENG101", "secId" => "001", "semester" => "Fall", "year" => 2023, "building" => "Engineering", "roomNumber" => "401", "timeSlotId" => "T04" },
                record!{ "courseId" => "BUS101", "secId" => "001", "semester" => "Fall", "year" => 2023, "building" => "Business", "roomNumber" => "501", "timeSlotId" => "T05" },
                record!{ "courseId" => "LAW101", "secId" => "001", "semester" => "Fall", "year" => 2023, "building" => "Law", "roomNumber" => "601", "timeSlotId" => "T06" },
                record!{ "courseId" => "MED101", "secId" => "001", "semester" => "Fall", "year" => 2023, "building" => "Medicine", "roomNumber" => "701", "timeSlotId" => "T07" },
                record!{ "courseId" => "LIB101", "secId" => "001", "semester" => "Fall", "year" => 2023, "building" => "Library", "roomNumber" => "801", "timeSlotId" => "T08" },
                record!{ "courseId" => "PE101", "secId" => "001", "semester" => "Fall", "year" => 2023, "building" => "Gym", "roomNumber" => "901", "timeSlotId" => "T09" },
                record!{ "courseId" => "RL101", "secId" => "001", "semester" => "Fall", "year" => 2023, "building" => "Dormitory", "roomNumber" => "1001", "timeSlotId" => "T10" },
            ],
        ),
        (
            SchemaName::Teaches,
            vec![
                record!{ "id" => "I001", "courseId" => "CS101", "secId" => "001", "semester" => "Fall", "year" => 2023 },
                record!{ "id" => "I002", "courseId" => "MATH101", "secId" => "001", "semester" => "Fall", "year" => 2023 },
                record!{ "id" => "I003", "courseId" => "PHYS101", "secId" => "001", "semester" => "Fall", "year" => 2023 },
                record!{ "id" => "I004", "courseId" => "ENG101", "secId" => "001", "semester" => "Fall", "year" => 2023 },
                record!{ "id" => "I005", "courseId" => "BUS101", "secId" => "001", "semester" => "Fall", "year" => 2023 },
                record!{ "id" => "I006", "courseId" => "LAW101", "secId" => "001", "semester" => "Fall", "year" => 2023 },
                record!{ "id" => "I007", "courseId" => "MED101", "secId" => "001", "semester" => "Fall", "year" => 2023 },
                record!{ "id" => "I008", "courseId" => "LIB101", "secId" => "001", "semester" => "Fall", "year" => 2023 },
                record!{ "id" => "I009", "courseId" => "PE101", "secId" => "001", "semester" => "Fall", "year" => 2023 },
                record!{ "id" => "I010", "courseId" => "RL101", "secId" => "001", "semester" => "Fall", "year" => 2023 },
            ],
        ),
        (
            SchemaName::Student,
            vec![
                record!{ "id" => "S001", "name" => "David Wilson", "deptName" => "Computer Science", "totCred" => 60 },
                record!{ "id" => "S002", "name" => "Eva Adams", "deptName" => "Mathematics", "totCred" => 30 },
                record!{ "id" => "S003", "name" => "Frank Lee", "deptName" => "Physics", "totCred" => 45 },
                record!{ "id" => "S004", "name" => "Grace Kim", "deptName" => "Engineering", "totCred" => 50 },
                record!{ "id" => "S005", "name" => "Hannah Brown", "deptName" => "Business", "totCred" => 40 },
                record!{ "id" => "S006", "name" => "Isaac Green", "deptName" => "Law", "totCred" => 35 },
                record!{ "id" => "S007", "name" => "Jack White", "deptName" => "Medicine", "totCred" => 55 },
                record!{ "id" => "S008", "name" => "Karen Black", "deptName" => "Library Science", "totCred" => 25 },
                record!{ "id" => "S009", "name" => "Liam Blue", "deptName" => "Physical Education", "totCred" => 20 },
                record!{ "id" => "S010", "name" => "Mia Brown", "deptName" => "Residential Life", "totCred" => 15 },
            ],
        ),
        (
            SchemaName::Takes,
            vec![
                record!{ "id" => "S001", "courseId" => "CS101", "secId" => "001", "semester" => "Fall", "year" => 2023, "grade" => "A" },
                record!{ "id" => "S002", "courseId" => "MATH101", "secId" => "001", "semester" => "Fall", "year" => 2023, "grade" => "B+" },
                record!{ "id" => "S003", "courseId" => "PHYS101", "secId" => "001", "semester" => "Fall", "year" => 2023, "grade" => "A-" },
                record!{ "id" => "S004", "courseId" => "ENG101", "secId" => "001", "semester" => "Fall", "year" => 2023, "grade" => "B" },
                record!{ "id" => "S005", "courseId" => "BUS101", "secId" => "001", "semester" => "Fall", "year" => 2023, "grade" => "A" },
                record!{ "id" => "S006", "courseId" => "LAW101", "secId" => "001", "semester" => "Fall", "year" => 2023, "grade" => "B-" },
                record!{ "id" => "S007", "courseId" => "MED101", "secId" => "001", "semester" => "Fall", "year" => 2023, "grade" => "A+" },
                record!{ "id" => "S008", "courseId" => "LIB101", "secId" => "001", "semester" => "Fall", "year" => 2023, "grade" => "B+" },
                record!{ "id" => "S009", "courseId" => "PE101", "secId" => "001", "semester" => "Fall", "year" => 2023, "grade" => "C" },
                record!{ "id" => "S010", "courseId" => "RL101", "secId" => "001", "semester" => "Fall", "year" => 2023, "grade" => "B" },
            ],
        ),
        (
            SchemaName::Advisor,
            vec![
                record!{ "sID" => "S001", "iID" => "I001" },
                record!{ "sID" => "S002", "iID" => "I002" },
                record!{ "sID" => "S003", "iID" => "I003" },
                record!{ "sID" => "S004", "iID" => "I004" },
                record!{ "sID" => "S005", "iID" => "I005" },
                record!{ "sID" => "S006", "iID" => "I006" },
                record!{ "sID" => "S007", "iID" => "I007" },
                record!{ "sID" => "S008", "iID" => "I008" },
                record!{ "sID" => "S009", "iID" => "I009" },
                record!{ "sID" => "S010", "iID" => "I010" },
            ],
        ),
        (
            SchemaName::TimeSlot,
            vec![
                record!{ "timeSlotId" => "T01", "day" => "Monday", "startTime" => "09:00", "endTime" => "10:30" },
                record!{ "timeSlotId" => "T02", "day" => "Tuesday", "startTime" => "11:00", "endTime" => "12:30" },
                record!{ "timeSlotId" => "T03", "day" => "Wednesday", "startTime" => "13:00", "endTime" => "14:30" },
                record!{ "timeSlotId" => "T04", "day" => "Thursday", "startTime" => "14:00", "endTime" => "15:30" },
                record!{ "timeSlotId" => "T05", "day" => "Friday", "startTime" => "10:00", "endTime" => "11:30" },
                record!{ "timeSlotId" => "T06", "day" => "Saturday", "startTime" => "09:00", "endTime" => "10:30" },
                record!{ "timeSlotId" => "T07", "day" => "Sunday", "startTime" => "11:00", "endTime" => "12:30" },
                record!{ "timeSlotId" => "T08", "day" => "Monday", "startTime" => "14:00", "endTime" => "15:30" },
                record!{ "timeSlotId" => "T09", "day" => "Tuesday", "startTime" => "16:00", "endTime" => "17:30" },
                record!{ "timeSlotId" => "T10", "day" => "Wednesday", "startTime" => "18:00", "endTime" => "19:30" },
            ],
        ),
        (
            SchemaName::Prerequisites,
            vec![
                record!{ "courseId" => "CS102", "prereqId" => "CS101" },
                record!{ "courseId" => "MATH201", "prereqId" => "MATH101" },
                record!{ "courseId" => "PHYS201", "prereqId" => "PHYS101" },
                record!{ "courseId" => "ENG201", "prereqId" => "ENG101" },
                record!{ "courseId" => "BUS201", "prereqId" => "BUS101" },
                record!{ "courseId" => "LAW201", "prereqId" => "LAW101" },
                record!{ "courseId" => "MED201", "prereqId" => "MED101" },
                record!{ "courseId" => "LIB201", "prereqId" => "LIB101" },
                record!{ "courseId" => "PE201", "prereqId" => "PE101" },
                record!{ "courseId" => "RL201", "prereqId" => "RL101" },
            ],
        ),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scalar;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_has_ten_records_per_schema() {
        let ds = Dataset::builtin();
        for schema in SchemaName::ALL {
            let records = ds.records(schema).expect("every schema is builtin");
            assert_eq!(records.len(), 10, "{schema}");
        }
        assert_eq!(ds.len(), 110);
    }

    #[test]
    fn builtin_fields_share_a_shape_per_schema() {
        let ds = Dataset::builtin();
        for schema in SchemaName::ALL {
            let records = ds.records(schema).unwrap();
            let first: Vec<_> = records[0].field_names().collect();
            for r in records {
                assert_eq!(r.field_names().collect::<Vec<_>>(), first, "{schema}");
            }
        }
    }

    #[test]
    fn builtin_is_shared() {
        assert!(Arc::ptr_eq(&Dataset::builtin(), &Dataset::builtin()));
    }

    #[test]
    fn builtin_keeps_numeric_fields_numeric() {
        let ds = Dataset::builtin();
        let first = &ds.records(SchemaName::Classroom).unwrap()[0];
        assert_eq!(first.get("roomNumber"), Some(&Scalar::from("101")));
        assert_eq!(first.get("capacity"), Some(&Scalar::Int(30)));
    }

    #[test]
    fn from_json_str_parses_known_schemas() {
        let ds = Dataset::from_json_str(
            r#"{"course": [{"courseId": "CS101", "credits": 3}], "Advisor": []}"#,
        )
        .unwrap();
        assert_eq!(ds.records(SchemaName::Course).unwrap().len(), 1);
        assert_eq!(ds.records(SchemaName::Advisor).unwrap().len(), 0);
        assert!(!ds.contains(SchemaName::Student));
        assert_eq!(ds.schemas().collect::<Vec<_>>(), vec![SchemaName::Course, SchemaName::Advisor]);
    }

    #[test]
    fn from_json_str_rejects_unknown_schema() {
        let err = Dataset::from_json_str(r#"{"Dormitory": []}"#).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownSchema(_)), "{err:?}");
    }

    #[test]
    fn from_json_str_rejects_malformed_json() {
        let err = Dataset::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)), "{err:?}");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }), "{err:?}");
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"{"Student": [{"id": "S001", "totCred": 60}]}"#).unwrap();
        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.len(), 1);
    }
}
