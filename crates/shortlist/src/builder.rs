//! Top-N selection over a consensus ranking.

use data_loader::types::format_decimal;
use data_loader::{CandidateRecord, ExportTable};
use ranking::ConsensusRanking;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CONSENSUS_RANK_COLUMN: &str = "Consensus Rank";
pub const AVERAGE_RANK_SCORE_COLUMN: &str = "Average Rank Score";

/// One shortlisted candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    /// 1-based position in the shortlist
    pub consensus_rank: usize,
    /// Consensus score rounded to two decimals
    pub average_rank_score: f64,
    /// Merge, quick and heap positions behind the score
    pub positions: [usize; 3],
    pub record: CandidateRecord,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShortlistBuilder;

impl ShortlistBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Take the first `min(count, len)` consensus entries.
    ///
    /// The ranking is left untouched; entries are fresh copies.
    pub fn build(&self, ranking: &ConsensusRanking, count: usize) -> Vec<ShortlistEntry> {
        if count > ranking.len() {
            debug!(
                "Shortlist size {} clamped to {} candidates",
                count,
                ranking.len()
            );
        }

        ranking
            .entries()
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, entry)| ShortlistEntry {
                consensus_rank: i + 1,
                average_rank_score: round_to_cents(entry.score),
                positions: entry.positions,
                record: entry.record.clone(),
            })
            .collect()
    }
}

fn round_to_cents(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Shortlist as an exportable table: `columns` followed by the rank and
/// score columns
pub fn to_export(entries: &[ShortlistEntry], columns: &[String]) -> ExportTable {
    let mut header = columns.to_vec();
    header.push(CONSENSUS_RANK_COLUMN.to_string());
    header.push(AVERAGE_RANK_SCORE_COLUMN.to_string());

    let mut table = ExportTable::new(header);
    for entry in entries {
        let mut row: Vec<Option<String>> = columns
            .iter()
            .map(|column| entry.record.column_value(column))
            .collect();
        row.push(Some(entry.consensus_rank.to_string()));
        row.push(Some(format_decimal(entry.average_rank_score)));
        table.push_row(row);
    }
    table
}
