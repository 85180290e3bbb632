//! Output record shapes and the per-row projection into them.

use csv::StringRecord;
use serde::Serialize;

use crate::data_type::DataType;

pub const MULTI_VALUE_SEPARATOR: char = '|';

/// One CSV data row addressed by header name.
///
/// Columns missing from the header, or cells missing from a short row, read
/// as `None` instead of failing.
#[derive(Debug, Clone, Copy)]
pub struct CsvRow<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl<'a> CsvRow<'a> {
    pub fn new(headers: &'a StringRecord, record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    pub fn get(&self, column: &str) -> Option<&'a str> {
        // Duplicate headers resolve to the right-most column.
        let idx = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, header)| *header == column)
            .map(|(idx, _)| idx)
            .last()?;
        self.record.get(idx)
    }

    fn owned(&self, column: &str) -> Option<String> {
        self.get(column).map(str::to_owned)
    }
}

/// Value of the one multi-valued column per record shape.
///
/// Present, non-empty cells are split on `|`. Anything else is passed through
/// as-is, so an empty cell stays `""` and a missing column stays `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MultiValue {
    Split(Vec<String>),
    Raw(Option<String>),
}

impl MultiValue {
    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell {
            Some(value) if !value.is_empty() => Self::Split(
                value
                    .split(MULTI_VALUE_SEPARATOR)
                    .map(str::to_owned)
                    .collect(),
            ),
            other => Self::Raw(other.map(str::to_owned)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub name: Option<String>,
    pub subjects: MultiValue,
    pub grade: Option<String>,
    pub age: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherRecord {
    pub name: Option<String>,
    pub teaching_subjects: MultiValue,
    #[serde(rename = "lectureLoad")]
    pub lecture_load: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassroomRecord {
    #[serde(rename = "roomNumber")]
    pub room_number: Option<String>,
    pub capacity: Option<String>,
    #[serde(rename = "isLab")]
    pub is_lab: Option<String>,
}

/// A converted row, serialized without an enclosing tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutputRecord {
    Student(StudentRecord),
    Teacher(TeacherRecord),
    Classroom(ClassroomRecord),
}

impl OutputRecord {
    pub fn from_row(data_type: DataType, row: &CsvRow<'_>) -> Self {
        match data_type {
            DataType::Students => Self::Student(StudentRecord {
                name: row.owned("name"),
                subjects: MultiValue::from_cell(row.get("subjects")),
                grade: row.owned("grade"),
                age: row.owned("age"),
            }),
            DataType::Teachers => Self::Teacher(TeacherRecord {
                name: row.owned("name"),
                teaching_subjects: MultiValue::from_cell(row.get("teaching_subjects")),
                lecture_load: row.owned("lectureLoad"),
            }),
            DataType::Classrooms => Self::Classroom(ClassroomRecord {
                room_number: row.owned("room_number"),
                capacity: row.owned("capacity"),
                is_lab: row.owned("isLab"),
            }),
        }
    }
}
