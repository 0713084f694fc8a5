//! # Shortlist Orchestrator
//!
//! This module coordinates one shortlist request over a loaded working set:
//! 1. Filter the working set with the caller's criteria
//! 2. Summarize the filtered set (count, average experience)
//! 3. Rank the filtered set by consensus of the three orderings
//! 4. Take the top N entries
//!
//! An empty filtered set is a normal outcome, reported through
//! [`Shortlist::is_empty`], not an error.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::builder::{self, ShortlistBuilder, ShortlistEntry};
use crate::config::ExportFormat;
use data_loader::{CandidateRecord, CandidateTable};
use pipeline::FilterCriteria;
use ranking::{ConsensusRanking, RankEngine};

/// Size and mean experience of a filtered set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilteredSummary {
    pub count: usize,
    /// 0.0 when the set is empty
    pub average_experience: f64,
}

impl FilteredSummary {
    pub fn of(records: &[CandidateRecord]) -> Self {
        let count = records.len();
        let average_experience = if count > 0 {
            let total: u64 = records.iter().map(|r| r.experience_years as u64).sum();
            total as f64 / count as f64
        } else {
            0.0
        };
        Self {
            count,
            average_experience,
        }
    }
}

/// Result of one shortlist request
#[derive(Debug, Clone, PartialEq)]
pub struct Shortlist {
    pub summary: FilteredSummary,
    pub ranking: ConsensusRanking,
    pub entries: Vec<ShortlistEntry>,
}

impl Shortlist {
    /// True when no candidate survived filtering
    pub fn is_empty(&self) -> bool {
        self.summary.count == 0
    }
}

/// Owns the working set and runs filter → rank → shortlist over it
#[derive(Debug, Clone)]
pub struct ShortlistOrchestrator {
    table: CandidateTable,
    engine: RankEngine,
    builder: ShortlistBuilder,
}

impl ShortlistOrchestrator {
    pub fn new(table: CandidateTable) -> Self {
        Self {
            table,
            engine: RankEngine::new(),
            builder: ShortlistBuilder::new(),
        }
    }

    /// Load and clean a candidate file, then wrap it
    pub fn load(path: &Path) -> Result<Self> {
        let table = CandidateTable::load_from_file(path)
            .with_context(|| format!("Failed to load candidates from {}", path.display()))?;
        Ok(Self::new(table))
    }

    pub fn table(&self) -> &CandidateTable {
        &self.table
    }

    /// Main entry point: shortlist up to `size` candidates matching `criteria`
    #[instrument(skip(self, criteria))]
    pub fn shortlist(&self, criteria: &FilterCriteria, size: usize) -> Shortlist {
        let start_time = Instant::now();

        let filtered = pipeline::filter(self.table.records().to_vec(), criteria);
        let summary = FilteredSummary::of(&filtered);
        if filtered.is_empty() {
            warn!("No candidates matched the given filters");
        } else {
            info!(
                "Filtered to {} candidates, average experience {:.1} years",
                summary.count, summary.average_experience
            );
        }

        let ranking = self.engine.rank(filtered);
        let entries = self.builder.build(&ranking, size);
        info!(
            "Selected top {} of {} candidates in {:.2?}",
            entries.len(),
            ranking.len(),
            start_time.elapsed()
        );

        Shortlist {
            summary,
            ranking,
            entries,
        }
    }

    /// Write the shortlist into `dir` in `format`.
    ///
    /// Exported columns are the cleaned dataset columns followed by
    /// `Consensus Rank` and `Average Rank Score`.
    pub fn export(
        &self,
        shortlist: &Shortlist,
        format: ExportFormat,
        dir: &Path,
    ) -> Result<Option<PathBuf>> {
        let table = builder::to_export(&shortlist.entries, &self.table.export_columns());
        format
            .write(dir, &table)
            .with_context(|| format!("Failed to export shortlist to {}", dir.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::TextField;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn candidate(name: &str, years: u32, work_type: &str, location: &str) -> CandidateRecord {
        CandidateRecord::new(0)
            .with_text(TextField::ContactPerson, name)
            .with_text(TextField::Experience, &format!("{years} Years"))
            .with_text(TextField::WorkType, work_type)
            .with_text(TextField::Location, location)
            .with_experience(years)
    }

    fn build_test_orchestrator() -> ShortlistOrchestrator {
        let columns = vec![
            "Contact Person".to_string(),
            "Experience".to_string(),
            "Work Type".to_string(),
            "location".to_string(),
        ];
        let records = vec![
            candidate("Ana Ruiz", 3, "Full-Time", "Lima"),
            candidate("Bo Chen", 8, "Intern", "Oslo"),
            candidate("Cy Diaz", 8, "Full-Time", "Lima"),
            candidate("Di Ho", 1, "Part-Time", "Lima"),
        ];
        ShortlistOrchestrator::new(CandidateTable::from_records(columns, records))
    }

    fn names(shortlist: &Shortlist) -> Vec<&str> {
        shortlist
            .entries
            .iter()
            .filter_map(|e| e.record.text(TextField::ContactPerson))
            .collect()
    }

    // ============================================================================
    // Unit Tests
    // ============================================================================

    #[test]
    fn test_unfiltered_end_to_end_order() {
        let orchestrator = build_test_orchestrator();

        let shortlist = orchestrator.shortlist(&FilterCriteria::new(), 5);

        assert_eq!(names(&shortlist), vec!["Bo Chen", "Cy Diaz", "Ana Ruiz", "Di Ho"]);
        assert_eq!(shortlist.summary.count, 4);
        assert_eq!(shortlist.summary.average_experience, 5.0);
    }

    #[test]
    fn test_filtered_ids_are_filtered_positions() {
        let orchestrator = build_test_orchestrator();
        let criteria = FilterCriteria::new().with_location("lima");

        let shortlist = orchestrator.shortlist(&criteria, 2);

        assert_eq!(names(&shortlist), vec!["Cy Diaz", "Ana Ruiz"]);
        let ids: Vec<usize> = shortlist.entries.iter().map(|e| e.record.id).collect();
        assert_eq!(ids, vec![1, 0]);
        assert_eq!(shortlist.summary.count, 3);
    }

    #[test]
    fn test_empty_result_is_reported() {
        let orchestrator = build_test_orchestrator();
        let criteria = FilterCriteria::new().with_min_experience(20);

        let shortlist = orchestrator.shortlist(&criteria, 5);

        assert!(shortlist.is_empty());
        assert!(shortlist.entries.is_empty());
        assert_eq!(shortlist.summary.average_experience, 0.0);
    }

    #[test]
    fn test_working_set_is_not_mutated() {
        let orchestrator = build_test_orchestrator();

        orchestrator.shortlist(&FilterCriteria::new().with_work_type("full"), 1);

        assert_eq!(orchestrator.table().len(), 4);
        let ids: Vec<usize> = orchestrator.table().records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_export_csv_includes_rank_columns() {
        let orchestrator = build_test_orchestrator();
        let shortlist = orchestrator.shortlist(&FilterCriteria::new(), 2);
        let dir = tempfile::tempdir().unwrap();

        let path = orchestrator
            .export(&shortlist, ExportFormat::Csv, dir.path())
            .expect("export failed")
            .expect("csv export should write a file");

        let written = std::fs::read_to_string(path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("Contact Person,Experience,Work Type,location,Experience_Value,Salary_Mid,Consensus Rank,Average Rank Score")
        );
        assert_eq!(
            lines.next(),
            Some("Bo Chen,8 Years,Intern,Oslo,8,,1,0.0")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.csv");
        std::fs::write(
            &path,
            "Contact Person,Experience,location\nAna Ruiz,3 Years,Lima\nBo Chen,N/A,Oslo\n",
        )
        .unwrap();

        let orchestrator = ShortlistOrchestrator::load(&path).expect("load failed");

        assert_eq!(orchestrator.table().len(), 1);
        let shortlist = orchestrator.shortlist(&FilterCriteria::new(), 5);
        assert_eq!(names(&shortlist), vec!["Ana Ruiz"]);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = ShortlistOrchestrator::load(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to load candidates"));
    }

    #[test]
    fn test_export_excel_reads_back() {
        let orchestrator = build_test_orchestrator();
        let shortlist = orchestrator.shortlist(&FilterCriteria::new(), 2);
        let dir = tempfile::tempdir().unwrap();

        let path = orchestrator
            .export(&shortlist, ExportFormat::Excel, dir.path())
            .expect("export failed")
            .expect("excel export should write a file");
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("xlsx"));

        let table = data_loader::parser::read_table(&path).expect("workbook should read back");
        assert_eq!(table.rows.len(), 2);
        let first = &table.rows[0];
        assert_eq!(first.get("Contact Person"), Some(&serde_json::Value::from("Bo Chen")));
        assert_eq!(first.get("Consensus Rank"), Some(&serde_json::Value::from(1)));
        assert_eq!(first.get("Average Rank Score"), Some(&serde_json::Value::from(0)));
    }

    #[test]
    fn test_export_skip_writes_nothing() {
        let orchestrator = build_test_orchestrator();
        let shortlist = orchestrator.shortlist(&FilterCriteria::new(), 2);
        let dir = tempfile::tempdir().unwrap();

        let written = orchestrator
            .export(&shortlist, ExportFormat::Skip, dir.path())
            .expect("export failed");

        assert!(written.is_none());
    }
}
