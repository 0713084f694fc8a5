//! Shortlist size and export format, parsed from raw user input.
//!
//! Neither setting can fail: bad input degrades to the default size or to
//! no export.

use chrono::Local;
use data_loader::export::{write_csv, write_xlsx};
use data_loader::ExportTable;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_SHORTLIST_SIZE: usize = 5;

/// Reported when nothing is exported
pub const EXPORT_SKIPPED_MESSAGE: &str = "Unsupported export format or skipped.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Parse a shortlist size; missing, non-integer or negative input gives
/// [`DEFAULT_SHORTLIST_SIZE`].
pub fn parse_shortlist_size(raw: Option<&str>) -> usize {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return DEFAULT_SHORTLIST_SIZE;
    };
    match raw.parse::<usize>() {
        Ok(size) => size,
        Err(_) => {
            warn!(
                "Invalid shortlist size '{}', using {}",
                raw, DEFAULT_SHORTLIST_SIZE
            );
            DEFAULT_SHORTLIST_SIZE
        }
    }
}

/// Where a shortlist goes after it is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Csv,
    Excel,
    #[default]
    Skip,
}

impl ExportFormat {
    /// Case-insensitive; anything other than `csv` or `excel` means skip
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "csv" => ExportFormat::Csv,
            "excel" => ExportFormat::Excel,
            "" | "none" => ExportFormat::Skip,
            other => {
                debug!("Unrecognized export format '{}', skipping export", other);
                ExportFormat::Skip
            }
        }
    }

    pub fn extension(self) -> Option<&'static str> {
        match self {
            ExportFormat::Csv => Some("csv"),
            ExportFormat::Excel => Some("xlsx"),
            ExportFormat::Skip => None,
        }
    }

    /// `top_candidates_<timestamp>.<ext>`, or `None` when skipping
    pub fn file_name(self, timestamp: &str) -> Option<String> {
        self.extension()
            .map(|ext| format!("top_candidates_{timestamp}.{ext}"))
    }

    /// Write `table` into `dir` under a timestamped name.
    ///
    /// Returns the written path, or `None` for [`ExportFormat::Skip`].
    pub fn write(self, dir: &Path, table: &ExportTable) -> data_loader::Result<Option<PathBuf>> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let Some(name) = self.file_name(&timestamp) else {
            return Ok(None);
        };
        let path = dir.join(name);
        match self {
            ExportFormat::Csv => write_csv(&path, table)?,
            ExportFormat::Excel => write_xlsx(&path, table)?,
            ExportFormat::Skip => return Ok(None),
        }
        Ok(Some(path))
    }
}

/// Resolved shortlist settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortlistConfig {
    pub size: usize,
    pub export: ExportFormat,
}

impl Default for ShortlistConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SHORTLIST_SIZE,
            export: ExportFormat::Skip,
        }
    }
}

impl ShortlistConfig {
    pub fn from_raw(size: Option<&str>, export: Option<&str>) -> Self {
        Self {
            size: parse_shortlist_size(size),
            export: export.map(ExportFormat::parse).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shortlist_size() {
        assert_eq!(parse_shortlist_size(Some("3")), 3);
        assert_eq!(parse_shortlist_size(Some(" 12 ")), 12);
        assert_eq!(parse_shortlist_size(Some("0")), 0);
        assert_eq!(parse_shortlist_size(None), 5);
        assert_eq!(parse_shortlist_size(Some("")), 5);
        assert_eq!(parse_shortlist_size(Some("ten")), 5);
        assert_eq!(parse_shortlist_size(Some("-2")), 5);
        assert_eq!(parse_shortlist_size(Some("2.5")), 5);
    }

    #[test]
    fn test_parse_export_format() {
        assert_eq!(ExportFormat::parse("csv"), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse(" EXCEL "), ExportFormat::Excel);
        assert_eq!(ExportFormat::parse(""), ExportFormat::Skip);
        assert_eq!(ExportFormat::parse("none"), ExportFormat::Skip);
        assert_eq!(ExportFormat::parse("pdf"), ExportFormat::Skip);
    }

    #[test]
    fn test_file_name() {
        let stamp = "2024-03-01_09-15-00";
        assert_eq!(
            ExportFormat::Csv.file_name(stamp).as_deref(),
            Some("top_candidates_2024-03-01_09-15-00.csv")
        );
        assert_eq!(
            ExportFormat::Excel.file_name(stamp).as_deref(),
            Some("top_candidates_2024-03-01_09-15-00.xlsx")
        );
        assert_eq!(ExportFormat::Skip.file_name(stamp), None);
    }

    #[test]
    fn test_write_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = ExportTable::new(vec!["Contact Person".to_string()]);
        table.push_row(vec![Some("Ana Ruiz".to_string())]);

        let path = ExportFormat::Csv.write(dir.path(), &table).unwrap().unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("top_candidates_"));
        assert!(name.ends_with(".csv"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Ana Ruiz"));
    }

    #[test]
    fn test_skip_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let table = ExportTable::new(vec!["Contact Person".to_string()]);

        assert_eq!(ExportFormat::Skip.write(dir.path(), &table).unwrap(), None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_config_from_raw() {
        let config = ShortlistConfig::from_raw(Some("abc"), Some("Csv"));
        assert_eq!(config.size, 5);
        assert_eq!(config.export, ExportFormat::Csv);
        assert_eq!(ShortlistConfig::from_raw(None, None), ShortlistConfig::default());
    }
}
