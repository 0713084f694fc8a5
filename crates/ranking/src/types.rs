//! Shared types for the ranking engine.

use crate::orderings;
use data_loader::{CandidateRecord, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the orderings sort: a filtered-set id and its experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankKey {
    pub id: RecordId,
    pub experience: u32,
}

impl RankKey {
    pub fn new(id: RecordId, experience: u32) -> Self {
        Self { id, experience }
    }

    pub fn from_record(record: &CandidateRecord) -> Self {
        Self::new(record.id, record.experience_years)
    }
}

/// The three fixed orderings fused into the consensus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Merge,
    Quick,
    Heap,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Merge, Algorithm::Quick, Algorithm::Heap];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
        }
    }

    /// Order `keys` by descending experience using this algorithm's
    /// tie-break rule
    pub fn order(self, keys: &[RankKey]) -> Vec<RankKey> {
        match self {
            Algorithm::Merge => orderings::merge_order(keys),
            Algorithm::Quick => orderings::quick_order(keys),
            Algorithm::Heap => orderings::heap_order(keys),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One algorithm's total order, as id → 0-based position.
///
/// Built from an ordering over ids `0..n`, so `positions[id]` is defined for
/// every id in the filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmRanking {
    pub algorithm: Algorithm,
    order: Vec<RecordId>,
    pub(crate) positions: Vec<usize>,
}

impl AlgorithmRanking {
    /// Record each key's position in `ordered`.
    ///
    /// `ordered` must be a permutation of ids `0..ordered.len()`.
    pub fn from_order(algorithm: Algorithm, ordered: &[RankKey]) -> Self {
        let mut positions = vec![0; ordered.len()];
        for (position, key) in ordered.iter().enumerate() {
            positions[key.id] = position;
        }
        Self {
            algorithm,
            order: ordered.iter().map(|key| key.id).collect(),
            positions,
        }
    }

    /// Rank position of `id`, if it belongs to the ranked set
    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Ids from best to worst
    pub fn order(&self) -> &[RecordId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A record with its consensus score.
///
/// `record.id` is the record's position in the filtered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusEntry {
    /// Mean of the three positions; lower is better
    pub score: f64,
    /// Positions from the merge, quick and heap orderings, in that order
    pub positions: [usize; 3],
    pub record: CandidateRecord,
}
