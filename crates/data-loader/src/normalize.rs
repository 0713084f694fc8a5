//! Row normalization: text cleaning and derived numeric fields.
//!
//! Nothing here fails. Unparsable experience text becomes 0 years and a
//! salary range without exactly two `K` tokens has no midpoint.

use crate::types::{CandidateRecord, RawRecord, RecordId, TextField};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::BTreeSet;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static RE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

static RE_THOUSANDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+K").unwrap());

/// Experience text assumed when the field is missing or null
pub const MISSING_EXPERIENCE: &str = "0 Years";

/// Collapse whitespace runs to one space and trim both ends
pub fn clean_text(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// First run of decimal digits, parsed as years
///
/// Example: "12+ years exp" -> 12
///          "N/A" -> 0
pub fn extract_experience_years(text: &str) -> u32 {
    RE_DIGITS
        .find(text)
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(0)
}

/// Midpoint of a "20K-40K" style range
///
/// Exactly two `<digits>K` tokens are required; one token or three tokens
/// are ambiguous and yield `None`.
pub fn salary_midpoint(text: &str) -> Option<f64> {
    let tokens: Vec<u64> = RE_THOUSANDS
        .find_iter(text)
        .map(|token| token.as_str().trim_end_matches('K').parse::<u64>())
        .collect::<Result<_, _>>()
        .ok()?;

    match tokens.as_slice() {
        [low, high] => Some((*low as f64 + *high as f64) / 2.0),
        _ => None,
    }
}

/// Render any raw value as text, as a spreadsheet cell would show it.
/// `Null` has no rendering.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Turns raw rows into [`CandidateRecord`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize every row, preserving input order.
    ///
    /// Record ids are the row positions. Rows are independent, so the work
    /// fans out over rayon; the collected output keeps the original order.
    pub fn normalize_all(&self, rows: &[RawRecord]) -> Vec<CandidateRecord> {
        rows.par_iter()
            .enumerate()
            .map(|(id, row)| self.normalize(id, row))
            .collect()
    }

    /// Normalize a single row.
    pub fn normalize(&self, id: RecordId, raw: &RawRecord) -> CandidateRecord {
        let mut record = CandidateRecord::new(id);
        let mut experience_raw: Option<String> = None;
        let mut salary_raw: Option<&str> = None;
        let mut seen = BTreeSet::new();

        for (column, value) in raw.cells() {
            let Some(field) = TextField::from_header(column) else {
                if let Some(text) = stringify(value) {
                    record.passthrough.push((column.clone(), text));
                }
                continue;
            };

            // The first column resolving to a field wins, even when null
            if !seen.insert(field) {
                continue;
            }

            match field {
                TextField::Experience => experience_raw = stringify(value),
                TextField::SalaryRange => salary_raw = value.as_str(),
                _ => {}
            }

            match value {
                Value::String(text) => {
                    record.text.insert(field, clean_text(text));
                }
                Value::Null => {}
                other => {
                    // Non-string values are not text; keep them verbatim for export
                    record.passthrough.push((column.clone(), other.to_string()));
                }
            }
        }

        if let Entry::Vacant(slot) = record.text.entry(TextField::Experience) {
            if experience_raw.is_none() {
                slot.insert(MISSING_EXPERIENCE.to_string());
            }
        }
        record.text.entry(TextField::Skills).or_default();

        let experience_text = experience_raw.as_deref().unwrap_or(MISSING_EXPERIENCE);
        record.experience_years = extract_experience_years(experience_text);
        record.salary_midpoint = salary_raw.and_then(salary_midpoint);

        record
    }
}
