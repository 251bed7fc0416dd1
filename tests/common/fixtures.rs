//! Static fixtures used across harnesses.

/// A small dataset file covering two schemas, mixing text and numbers.
pub const DATASET_JSON: &str = r#"{
  "Course": [
    { "courseId": "CS101", "title": "Intro to CS", "deptName": "Computer Science", "credits": 4 },
    { "courseId": "MA201", "title": "Linear Algebra", "deptName": "Mathematics", "credits": 3 },
    { "courseId": "PH110", "title": "Optics, Waves", "deptName": "Physics", "credits": 3 }
  ],
  "classroom": [
    { "building": "North", "roomNumber": "12", "capacity": 40 }
  ]
}"#;

/// Dataset JSON naming a schema that does not exist.
pub const DATASET_UNKNOWN_SCHEMA_JSON: &str = r#"{ "Dormitory": [] }"#;

/// Queries with a known match count against the builtin Course table.
pub const COURSE_QUERY_COUNTS: &[(&str, usize)] = &[
    ("", 10),
    ("Intro", 8),
    ("introduction to", 8),
    ("cs101", 1),
    ("Computer Science", 1),
    ("zzz", 0),
];

/// Query strings for property tests: a mix of hits, misses, and odd input.
pub const SAMPLE_QUERIES: &[&str] = &[
    "", "a", "Intro", "cs", "2023", "90000", "Fall", "  ", "zzz", "I00", "é",
];
