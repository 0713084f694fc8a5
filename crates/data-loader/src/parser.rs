//! Parsers for tabular candidate sources.
//!
//! Two formats are supported:
//! - CSV: header row, comma separated, double-quoted fields may contain
//!   commas, newlines and `""` escapes
//! - JSON: an array of objects, one object per row
//! - Excel: the first worksheet, first row as header
//!
//! Empty cells and JSON nulls all become `Value::Null`.

use crate::error::{DataLoadError, Result};
use crate::types::{RawRecord, RawTable};
use calamine::{open_workbook_auto, Data, Reader};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a table, picking the parser from the file extension
pub fn read_table(path: &Path) -> Result<RawTable> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => parse_csv(path),
        Some("json") => parse_json(path),
        Some("xlsx" | "xls") => parse_excel(path),
        _ => Err(DataLoadError::UnsupportedInput {
            path: path.display().to_string(),
        }),
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse a CSV file with a header row
pub fn parse_csv(path: &Path) -> Result<RawTable> {
    let content = read_source(path)?;
    parse_csv_str(&content, &file_label(path))
}

/// Parse CSV text. `file` is only used for error context.
pub fn parse_csv_str(content: &str, file: &str) -> Result<RawTable> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = split_records(content, file)?.into_iter();

    let Some((_, header)) = records.next() else {
        return Ok(RawTable::default());
    };
    let columns: Vec<String> = header.into_iter().map(|name| name.trim().to_string()).collect();

    let mut rows = Vec::new();
    for (line, cells) in records {
        if cells.len() > columns.len() {
            return Err(DataLoadError::FieldCountMismatch {
                file: file.to_string(),
                expected: columns.len(),
                found: cells.len(),
                line,
            });
        }

        let mut row = RawRecord::new();
        let mut cells = cells.into_iter();
        for column in &columns {
            let value = match cells.next() {
                Some(cell) if !cell.is_empty() => Value::String(cell),
                _ => Value::Null,
            };
            row.push(column.clone(), value);
        }
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

/// Split CSV text into records of cells, tagged with the line each starts on.
/// Blank lines are skipped.
fn split_records(content: &str, file: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                push_record(&mut records, row_start, std::mem::take(&mut row));
                line += 1;
                row_start = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line: row_start,
            reason: "Unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_record(&mut records, row_start, row);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<(usize, Vec<String>)>, line: usize, row: Vec<String>) {
    let blank = row.len() == 1 && row[0].trim().is_empty();
    if !blank {
        records.push((line, row));
    }
}

/// Parse a JSON array of row objects
///
/// Column order is the order in which keys are first seen across rows.
pub fn parse_json(path: &Path) -> Result<RawTable> {
    let content = read_source(path)?;
    parse_json_str(&content)
}

pub fn parse_json_str(content: &str) -> Result<RawTable> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(content)?;

    let mut columns: Vec<String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = objects
        .into_iter()
        .map(|mut object| {
            let mut row = RawRecord::new();
            for column in &columns {
                let value = object.remove(column).unwrap_or(Value::Null);
                row.push(column.clone(), value);
            }
            row
        })
        .collect();

    Ok(RawTable { columns, rows })
}

/// Read the first worksheet of an Excel workbook
pub fn parse_excel(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let spreadsheet_error = |reason: String| DataLoadError::Spreadsheet {
        file: file_label(path),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| spreadsheet_error(e.to_string()))?,
        None => return Ok(RawTable::default()),
    };

    let mut sheet_rows = range.rows();
    let Some(header) = sheet_rows.next() else {
        return Ok(RawTable::default());
    };
    let columns: Vec<String> = header
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let rows = sheet_rows
        .filter(|cells| cells.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|cells| {
            let mut row = RawRecord::new();
            for (column, cell) in columns.iter().zip(cells) {
                row.push(column.clone(), excel_value(cell));
            }
            row
        })
        .collect();

    Ok(RawTable { columns, rows })
}

/// Whole floats become integers, the way spreadsheet ids and counts are meant
fn excel_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(text) if text.is_empty() => Value::Null,
        Data::String(text) => Value::String(text.clone()),
        Data::Int(n) => Value::from(*n),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Value::from(*f as i64),
        Data::Float(f) => Value::from(*f),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string()),
    }
}
