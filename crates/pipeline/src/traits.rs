//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use data_loader::CandidateRecord;

/// Core trait for filtering candidate records.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - Filters take ownership of the Vec and return the kept records
/// - A filter never reorders: the output preserves input order
/// - Filters cannot fail. A predicate over a missing column keeps everything
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    fn apply(&self, candidates: Vec<CandidateRecord>) -> Vec<CandidateRecord>;
}
