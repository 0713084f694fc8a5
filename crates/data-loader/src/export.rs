//! Writers for row/column exports.
//!
//! CSV follows the same quoting rules the parser accepts. Excel output is a
//! real `.xlsx` workbook, readable back through the parser.

use crate::error::{DataLoadError, Result};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::fs;
use std::path::Path;
use tracing::info;

/// A rectangular table of string cells ready to be written out.
///
/// `None` cells are written empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ExportTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn escape_csv(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Render the table as CSV text with a header row
pub fn to_csv_string(table: &ExportTable) -> String {
    let mut out = String::new();
    let header: Vec<String> = table.columns.iter().map(|c| escape_csv(c)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.as_deref().map(escape_csv).unwrap_or_default())
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

pub fn write_csv(path: &Path, table: &ExportTable) -> Result<()> {
    fs::write(path, to_csv_string(table))?;
    info!("Wrote {} rows to {:?}", table.len(), path);
    Ok(())
}

/// Cells that read as plain decimal numbers are written as numbers
fn numeric_cell(value: &str) -> Option<f64> {
    if value.is_empty()
        || !value
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b'.' || b == b'-')
    {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Write the table as a single-sheet `.xlsx` workbook
pub fn write_xlsx(path: &Path, table: &ExportTable) -> Result<()> {
    let spreadsheet_error = |e: XlsxError| DataLoadError::Spreadsheet {
        file: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, column) in table.columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, column.as_str())
            .map_err(spreadsheet_error)?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let sheet_row = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let Some(value) = cell else { continue };
            let written = match numeric_cell(value) {
                Some(number) => worksheet.write_number(sheet_row, col as u16, number),
                None => worksheet.write_string(sheet_row, col as u16, value.as_str()),
            };
            written.map_err(spreadsheet_error)?;
        }
    }

    workbook.save(path).map_err(spreadsheet_error)?;
    info!("Wrote {} rows to {:?}", table.len(), path);
    Ok(())
}
