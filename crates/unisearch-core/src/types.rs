//! Core types for unisearch-core.
//!
//! This module defines the data model shared by every layer: the fixed set of
//! [`SchemaName`]s, the [`Scalar`] field value, and the ordered [`Record`].

use crate::error::SchemaError;
use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{fmt, str::FromStr};

// ---------------------------------------------------------------------------
// SchemaName
// ---------------------------------------------------------------------------

/// One of the eleven fixed record categories.
///
/// Variant order is the order the schema picker lists them in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaName {
    #[default]
    Classroom,
    Department,
    Course,
    Instructor,
    Section,
    Teaches,
    Student,
    Takes,
    Advisor,
    TimeSlot,
    Prerequisites,
}

/// Lowercase spellings accepted by [`SchemaName::from_str`].
static SCHEMA_LOOKUP: phf::Map<&'static str, SchemaName> = phf::phf_map! {
    "classroom" => SchemaName::Classroom,
    "department" => SchemaName::Department,
    "course" => SchemaName::Course,
    "instructor" => SchemaName::Instructor,
    "section" => SchemaName::Section,
    "teaches" => SchemaName::Teaches,
    "student" => SchemaName::Student,
    "takes" => SchemaName::Takes,
    "advisor" => SchemaName::Advisor,
    "timeslot" => SchemaName::TimeSlot,
    "time_slot" => SchemaName::TimeSlot,
    "prerequisites" => SchemaName::Prerequisites,
};

impl SchemaName {
    /// Every schema, in picker order.
    pub const ALL: [SchemaName; 11] = [
        SchemaName::Classroom,
        SchemaName::Department,
        SchemaName::Course,
        SchemaName::Instructor,
        SchemaName::Section,
        SchemaName::Teaches,
        SchemaName::Student,
        SchemaName::Takes,
        SchemaName::Advisor,
        SchemaName::TimeSlot,
        SchemaName::Prerequisites,
    ];

    /// Canonical display name, as shown in the picker.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaName::Classroom => "Classroom",
            SchemaName::Department => "Department",
            SchemaName::Course => "Course",
            SchemaName::Instructor => "Instructor",
            SchemaName::Section => "Section",
            SchemaName::Teaches => "Teaches",
            SchemaName::Student => "Student",
            SchemaName::Takes => "Takes",
            SchemaName::Advisor => "Advisor",
            SchemaName::TimeSlot => "TimeSlot",
            SchemaName::Prerequisites => "Prerequisites",
        }
    }

    /// Position of this schema within [`SchemaName::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The schema after this one, wrapping at the end of the list.
    pub fn next(self) -> SchemaName {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The schema before this one, wrapping at the start of the list.
    pub fn prev(self) -> SchemaName {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaName {
    type Err = SchemaError;

    /// Case-insensitive lookup of a schema name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SCHEMA_LOOKUP
            .get(s.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| SchemaError::UnknownSchema(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for SchemaName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Serialize for SchemaName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    /// String form of the value, used for matching, table cells and output.
    ///
    /// Integers render in plain decimal. Floats use the shortest round-trip
    /// form without an exponent, so `2.0` renders as `"2"`.
    pub fn render(&self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(x) => x.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n.into())
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One row of a schema: field name → value, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Scalar)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Builder-style, used by the builtin dataset.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a field, replacing the value in place if the name already exists.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Scalar>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Rendered values looked up by name, one per column. Missing fields
    /// render as the empty string.
    pub fn render_columns(&self, columns: &[&str]) -> Vec<String> {
        columns
            .iter()
            .map(|c| self.get(c).map(Scalar::render).unwrap_or_default())
            .collect()
    }

    /// A copy holding only `columns`, in column order. Missing fields are
    /// left out.
    pub fn project(&self, columns: &[&str]) -> Record {
        columns.iter().fold(Record::new(), |acc, c| match self.get(c) {
            Some(v) => acc.with(*c, v.clone()),
            None => acc,
        })
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Field values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Scalar> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// Hand-written so that field order in the source document is kept.
impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of string, number, or boolean fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((name, value)) = access.next_entry::<String, Scalar>()? {
                    record.push(name, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn columns_are_looked_up_by_name() {
        let r = Record::new().with("credits", 4).with("courseId", "MA201");
        assert_eq!(r.render_columns(&["courseId", "credits", "title"]), vec!["MA201", "4", ""]);

        let projected = r.project(&["courseId", "title", "credits"]);
        assert_eq!(projected.field_names().collect::<Vec<_>>(), vec!["courseId", "credits"]);
        assert_eq!(projected.get("credits"), Some(&Scalar::Int(4)));
    }

    #[rstest]
    #[case("Course", SchemaName::Course)]
    #[case("course", SchemaName::Course)]
    #[case("COURSE", SchemaName::Course)]
    #[case("TimeSlot", SchemaName::TimeSlot)]
    #[case("time_slot", SchemaName::TimeSlot)]
    #[case("prerequisites", SchemaName::Prerequisites)]
    fn schema_names_parse_case_insensitively(#[case] input: &str, #[case] expected: SchemaName) {
        assert_eq!(input.parse::<SchemaName>().unwrap(), expected);
    }

    #[test]
    fn unknown_schema_is_an_error() {
        let err = "Dormitory".parse::<SchemaName>().unwrap_err();
        assert_eq!(err, SchemaError::UnknownSchema("Dormitory".to_string()));
    }

    #[test]
    fn all_lists_eleven_schemas_in_picker_order() {
        assert_eq!(SchemaName::ALL.len(), 11);
        for (i, schema) in SchemaName::ALL.iter().enumerate() {
            assert_eq!(schema.index(), i);
            assert_eq!(schema.as_str().parse::<SchemaName>().unwrap(), *schema);
        }
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(SchemaName::Prerequisites.next(), SchemaName::Classroom);
        assert_eq!(SchemaName::Classroom.prev(), SchemaName::Prerequisites);
        assert_eq!(SchemaName::Course.next().prev(), SchemaName::Course);
    }

    #[rstest]
    #[case(Scalar::Int(30), "30")]
    #[case(Scalar::Int(-7), "-7")]
    #[case(Scalar::Float(1.5), "1.5")]
    #[case(Scalar::Float(2.0), "2")]
    #[case(Scalar::Bool(true), "true")]
    #[case(Scalar::Text("B+".into()), "B+")]
    fn scalar_render(#[case] value: Scalar, #[case] expected: &str) {
        assert_eq!(value.render(), expected);
    }

    #[test]
    fn record_keeps_insertion_order() {
        let r = Record::new()
            .with("id", "I007")
            .with("name", "George Harris")
            .with("salary", 90000);
        let names: Vec<_> = r.field_names().collect();
        assert_eq!(names, vec!["id", "name", "salary"]);
        assert_eq!(r.get("salary"), Some(&Scalar::Int(90000)));
    }

    #[test]
    fn record_push_replaces_existing_field() {
        let mut r = Record::new().with("a", 1).with("b", 2);
        r.push("a", 3);
        assert_eq!(r.len(), 2);
        assert_eq!(r.get("a"), Some(&Scalar::Int(3)));
    }

    #[test]
    fn record_deserializes_in_document_order() {
        let r: Record =
            serde_json::from_str(r#"{"zeta": 1, "alpha": "x", "mid": 2.5, "flag": false}"#)
                .unwrap();
        let names: Vec<_> = r.field_names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid", "flag"]);
        assert_eq!(r.get("zeta"), Some(&Scalar::Int(1)));
        assert_eq!(r.get("mid"), Some(&Scalar::Float(2.5)));
        assert_eq!(r.get("flag"), Some(&Scalar::Bool(false)));
    }

    #[test]
    fn record_rejects_null_fields() {
        let result: Result<Record, _> = serde_json::from_str(r#"{"a": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn record_serializes_as_ordered_object() {
        let r = Record::new().with("b", 1).with("a", "x");
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"b":1,"a":"x"}"#);
    }
}
