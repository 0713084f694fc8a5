//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use data_loader::CandidateRecord;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MinExperienceFilter::new(3))
///     .add_filter(TextContainsFilter::new(TextField::Location, "santiago"));
///
/// let filtered = pipeline.apply(candidates);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// Every filter sees the output of the previous one, so the result is the
    /// conjunction of all predicates in input order. An empty result is a
    /// valid outcome.
    pub fn apply(&self, candidates: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{MinExperienceFilter, TextContainsFilter};
    use data_loader::TextField;

    fn candidates() -> Vec<CandidateRecord> {
        vec![
            CandidateRecord::new(0)
                .with_experience(2)
                .with_text(TextField::Location, "Santiago"),
            CandidateRecord::new(1)
                .with_experience(8)
                .with_text(TextField::Location, "New York"),
            CandidateRecord::new(2)
                .with_experience(6)
                .with_text(TextField::Location, "santiago de compostela"),
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();

        let filtered = pipeline.apply(candidates());
        assert_eq!(filtered, candidates());
    }

    #[test]
    fn test_single_filter() {
        let pipeline = FilterPipeline::new().add_filter(MinExperienceFilter::new(5));

        let filtered = pipeline.apply(candidates());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let pipeline = FilterPipeline::new()
            .add_filter(MinExperienceFilter::new(5))
            .add_filter(TextContainsFilter::new(TextField::Location, "SANTIAGO"));

        let filtered = pipeline.apply(candidates());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let pipeline = FilterPipeline::new().add_filter(MinExperienceFilter::new(50));

        assert!(pipeline.apply(candidates()).is_empty());
    }
}
