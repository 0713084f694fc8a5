//! Core domain types for candidate tables.
//!
//! Raw rows come straight from a tabular source and keep every value as-is.
//! Normalized rows ([`CandidateRecord`]) carry one typed slot per recognized
//! text attribute plus the derived numeric fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a record inside the working set it belongs to (0-based)
pub type RecordId = usize;

/// Derived column holding `experience_years` in exports
pub const EXPERIENCE_VALUE_COLUMN: &str = "Experience_Value";

/// Derived column holding `salary_midpoint` in exports
pub const SALARY_MID_COLUMN: &str = "Salary_Mid";

// =============================================================================
// Recognized Fields
// =============================================================================

/// Free-text attributes recognized by header name.
///
/// Headers are matched case-insensitively with `_`, `-` and spaces treated as
/// equivalent, so `Job Title`, `job_title` and `JOB-TITLE` all resolve to
/// [`TextField::JobTitle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TextField {
    ContactPerson,
    Experience,
    Qualifications,
    Location,
    Country,
    WorkType,
    Preference,
    JobTitle,
    Role,
    JobDescription,
    Benefits,
    Skills,
    Responsibilities,
    Company,
    SalaryRange,
}

impl TextField {
    pub const ALL: [TextField; 15] = [
        TextField::ContactPerson,
        TextField::Experience,
        TextField::Qualifications,
        TextField::Location,
        TextField::Country,
        TextField::WorkType,
        TextField::Preference,
        TextField::JobTitle,
        TextField::Role,
        TextField::JobDescription,
        TextField::Benefits,
        TextField::Skills,
        TextField::Responsibilities,
        TextField::Company,
        TextField::SalaryRange,
    ];

    /// Canonical header as it appears in the usual candidate export
    pub fn header(self) -> &'static str {
        match self {
            TextField::ContactPerson => "Contact Person",
            TextField::Experience => "Experience",
            TextField::Qualifications => "Qualifications",
            TextField::Location => "location",
            TextField::Country => "Country",
            TextField::WorkType => "Work Type",
            TextField::Preference => "Preference",
            TextField::JobTitle => "Job Title",
            TextField::Role => "Role",
            TextField::JobDescription => "Job Description",
            TextField::Benefits => "Benefits",
            TextField::Skills => "skills",
            TextField::Responsibilities => "Responsibilities",
            TextField::Company => "Company",
            TextField::SalaryRange => "Salary Range",
        }
    }

    /// Resolve a source header to a recognized field
    ///
    /// Example: "job_title" -> Some(TextField::JobTitle)
    ///          "Job Portal" -> None
    pub fn from_header(name: &str) -> Option<Self> {
        let key = header_key(name);
        Self::ALL
            .into_iter()
            .find(|field| header_key(field.header()) == key)
    }
}

fn header_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Raw Input
// =============================================================================

/// One row exactly as read from the source, in column order.
///
/// Values may be absent (`Value::Null`) or non-string (JSON numbers, booleans).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    cells: Vec<(String, Value)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Append a cell (builder pattern)
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.cells.push((column.into(), value.into()));
    }

    /// Look up a cell by its exact column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn cells(&self) -> &[(String, Value)] {
        &self.cells
    }

    /// Remove every cell whose column appears in `columns`
    pub fn drop_columns(&mut self, columns: &[String]) {
        self.cells.retain(|(name, _)| !columns.contains(name));
    }
}

/// A whole source table: header order plus rows.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRecord>,
}

// =============================================================================
// Normalized Records
// =============================================================================

/// One candidate after normalization.
///
/// Every text value satisfies the cleaning invariant: no leading/trailing
/// whitespace and no run of two or more whitespace characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: RecordId,
    /// Cleaned text per recognized attribute; missing attributes have no entry
    pub text: BTreeMap<TextField, String>,
    /// Unrecognized or non-string columns, stringified and kept for export
    pub passthrough: Vec<(String, String)>,
    /// First digit run of the experience text, 0 when there is none
    pub experience_years: u32,
    /// Mean of exactly two `<digits>K` salary tokens
    pub salary_midpoint: Option<f64>,
}

impl CandidateRecord {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            text: BTreeMap::new(),
            passthrough: Vec::new(),
            experience_years: 0,
            salary_midpoint: None,
        }
    }

    /// Set a text attribute, cleaning it on the way in
    pub fn with_text(mut self, field: TextField, value: &str) -> Self {
        self.text.insert(field, crate::normalize::clean_text(value));
        self
    }

    pub fn with_experience(mut self, years: u32) -> Self {
        self.experience_years = years;
        self
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = id;
        self
    }

    pub fn text(&self, field: TextField) -> Option<&str> {
        self.text.get(&field).map(String::as_str)
    }

    /// Value for an export column: recognized text first, then passthrough,
    /// then the derived columns.
    pub fn column_value(&self, column: &str) -> Option<String> {
        if let Some(value) = TextField::from_header(column).and_then(|field| self.text(field)) {
            return Some(value.to_string());
        }
        if let Some((_, value)) = self.passthrough.iter().find(|(name, _)| name == column) {
            return Some(value.clone());
        }
        match column {
            EXPERIENCE_VALUE_COLUMN => Some(self.experience_years.to_string()),
            SALARY_MID_COLUMN => self.salary_midpoint.map(format_decimal),
            _ => None,
        }
    }
}

/// Render a real the way spreadsheets expect: `30.0`, `32.5`
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

// =============================================================================
// CandidateTable - The Working Set
// =============================================================================

/// The normalized working set plus the source column order.
///
/// Invariant: every record has `experience_years > 0` and `records[i].id == i`.
#[derive(Debug, Clone, Default)]
pub struct CandidateTable {
    pub(crate) columns: Vec<String>,
    pub(crate) records: Vec<CandidateRecord>,
}

impl CandidateTable {
    /// Source columns that survived ingestion, in source order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CandidateRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
