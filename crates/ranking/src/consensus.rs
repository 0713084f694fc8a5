//! Consensus ranking.
//!
//! ## Algorithm
//! 1. Number the filtered records 0..n in their current order
//! 2. Run the merge, quick and heap orderings over (id, experience)
//! 3. Score each record by the mean of its three positions
//! 4. Sort by ascending score; equal scores keep filtered-set order

use crate::types::{Algorithm, AlgorithmRanking, ConsensusEntry, RankKey};
use data_loader::{CandidateRecord, RecordId};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Result of ranking a filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusRanking {
    entries: Vec<ConsensusEntry>,
    rankings: [AlgorithmRanking; 3],
}

impl ConsensusRanking {
    /// Entries from best (lowest score) to worst
    pub fn entries(&self) -> &[ConsensusEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ConsensusEntry> {
        self.entries
    }

    /// The per-algorithm ranking behind the consensus
    pub fn ranking(&self, algorithm: Algorithm) -> &AlgorithmRanking {
        match algorithm {
            Algorithm::Merge => &self.rankings[0],
            Algorithm::Quick => &self.rankings[1],
            Algorithm::Heap => &self.rankings[2],
        }
    }

    /// Filtered-set ids in consensus order
    pub fn order(&self) -> Vec<RecordId> {
        self.entries.iter().map(|entry| entry.record.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fuses the three orderings into one consensus order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankEngine;

impl RankEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rank a filtered set.
    ///
    /// Records are renumbered so that `id` is the position in `records`;
    /// the returned entries carry the renumbered records.
    #[instrument(skip_all, fields(candidates = records.len()))]
    pub fn rank(&self, records: Vec<CandidateRecord>) -> ConsensusRanking {
        let records: Vec<CandidateRecord> = records
            .into_iter()
            .enumerate()
            .map(|(id, record)| record.with_id(id))
            .collect();
        let keys: Vec<RankKey> = records.iter().map(RankKey::from_record).collect();

        let rankings = Algorithm::ALL.map(|algorithm| {
            let start = Instant::now();
            let ordered = algorithm.order(&keys);
            debug!(
                "{} ordering of {} candidates took {:?}",
                algorithm,
                ordered.len(),
                start.elapsed()
            );
            AlgorithmRanking::from_order(algorithm, &ordered)
        });

        let mut entries: Vec<ConsensusEntry> = records
            .into_iter()
            .map(|record| {
                let positions: [usize; 3] =
                    std::array::from_fn(|i| rankings[i].positions[record.id]);
                let score = positions.iter().sum::<usize>() as f64 / 3.0;
                ConsensusEntry {
                    score,
                    positions,
                    record,
                }
            })
            .collect();

        // sort_by is stable: equal scores stay in filtered-set order
        entries.sort_by(|a, b| a.score.total_cmp(&b.score));

        let disagreements = entries
            .iter()
            .filter(|entry| entry.positions.iter().any(|&p| p != entry.positions[0]))
            .count();
        info!(
            "Ranked {} candidates ({} with diverging algorithm positions)",
            entries.len(),
            disagreements
        );

        ConsensusRanking { entries, rankings }
    }
}
