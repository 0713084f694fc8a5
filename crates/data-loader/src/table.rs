//! Building the working set from a raw table.
//!
//! Steps, in order:
//! 1. Drop exact duplicate rows (first occurrence wins)
//! 2. Drop the irrelevant columns
//! 3. Normalize every row
//! 4. Keep only records with some experience and renumber them

use crate::error::Result;
use crate::export::ExportTable;
use crate::normalize::Normalizer;
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Columns removed during ingestion when present
pub const IRRELEVANT_COLUMNS: [&str; 3] = ["Contact", "Job Portal", "Company Profile"];

impl CandidateTable {
    /// Load a CSV or JSON file and build the working set
    #[instrument]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = parser::read_table(path)?;
        info!(
            "Read {} rows with {} columns from {:?}",
            raw.rows.len(),
            raw.columns.len(),
            path
        );
        Ok(Self::from_raw(raw))
    }

    /// Run hygiene and normalization over an already-parsed table
    pub fn from_raw(raw: RawTable) -> Self {
        let RawTable { mut columns, rows } = raw;
        let row_count = rows.len();

        let mut rows = drop_duplicate_rows(rows);
        if rows.len() < row_count {
            debug!("Dropped {} duplicate rows", row_count - rows.len());
        }

        let irrelevant: Vec<String> = columns
            .iter()
            .filter(|column| IRRELEVANT_COLUMNS.contains(&column.as_str()))
            .cloned()
            .collect();
        if !irrelevant.is_empty() {
            debug!("Dropping irrelevant columns: {:?}", irrelevant);
            columns.retain(|column| !irrelevant.contains(column));
            for row in &mut rows {
                row.drop_columns(&irrelevant);
            }
        }

        let records = Normalizer::new().normalize_all(&rows);
        let ambiguous_salaries = rows
            .iter()
            .zip(&records)
            .filter(|(row, record)| {
                record.salary_midpoint.is_none()
                    && row.cells().iter().any(|(column, value)| {
                        TextField::from_header(column) == Some(TextField::SalaryRange)
                            && !value.is_null()
                    })
            })
            .count();
        if ambiguous_salaries > 0 {
            debug!("{} salary ranges had no usable midpoint", ambiguous_salaries);
        }

        Self::from_records(columns, records)
    }

    /// Build a working set from normalized records.
    ///
    /// Records without experience are excluded and ids are reassigned so that
    /// `records[i].id == i`.
    pub fn from_records(columns: Vec<String>, records: Vec<CandidateRecord>) -> Self {
        let total = records.len();
        let records = retain_experienced(records);
        if records.len() < total {
            info!(
                "Excluded {} records without experience, {} remain",
                total - records.len(),
                records.len()
            );
        }
        Self { columns, records }
    }

    /// Columns written for the cleaned dataset: source columns plus the
    /// derived ones
    pub fn export_columns(&self) -> Vec<String> {
        let mut columns = self.columns.clone();
        for derived in [EXPERIENCE_VALUE_COLUMN, SALARY_MID_COLUMN] {
            if !columns.iter().any(|column| column == derived) {
                columns.push(derived.to_string());
            }
        }
        columns
    }

    /// The cleaned dataset as an exportable table
    pub fn to_export(&self) -> ExportTable {
        let mut table = ExportTable::new(self.export_columns());
        for record in &self.records {
            let row = table
                .columns
                .iter()
                .map(|column| record.column_value(column))
                .collect();
            table.push_row(row);
        }
        table
    }
}

/// Drop rows identical to an earlier row in every cell
pub fn drop_duplicate_rows(rows: Vec<RawRecord>) -> Vec<RawRecord> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| match serde_json::to_string(row.cells()) {
            Ok(key) => seen.insert(key),
            Err(_) => true,
        })
        .collect()
}

/// Keep records with `experience_years > 0`, renumbered from 0
pub fn retain_experienced(records: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
    records
        .into_iter()
        .filter(|record| record.experience_years > 0)
        .enumerate()
        .map(|(id, record)| record.with_id(id))
        .collect()
}
