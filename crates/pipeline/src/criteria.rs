//! Caller-supplied filter criteria and the `filter` entry point.
//!
//! Every field is optional. Absent fields and blank strings impose no
//! constraint; present ones are combined with logical AND.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{MinExperienceFilter, TextContainsFilter};
use data_loader::{CandidateRecord, TextField};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// The six recognized filter options.
///
/// Deserializes from JSON such as
/// `{"min_experience": 3, "location_contains": "Santiago"}`; unknown keys
/// are rejected so typos do not silently widen a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterCriteria {
    pub min_experience: Option<u32>,
    pub qualifications_contains: Option<String>,
    pub work_type_contains: Option<String>,
    pub job_title_contains: Option<String>,
    pub role_contains: Option<String>,
    pub location_contains: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_experience(mut self, years: u32) -> Self {
        self.min_experience = Some(years);
        self
    }

    pub fn with_qualifications(mut self, needle: impl Into<String>) -> Self {
        self.qualifications_contains = Some(needle.into());
        self
    }

    pub fn with_work_type(mut self, needle: impl Into<String>) -> Self {
        self.work_type_contains = Some(needle.into());
        self
    }

    pub fn with_job_title(mut self, needle: impl Into<String>) -> Self {
        self.job_title_contains = Some(needle.into());
        self
    }

    pub fn with_role(mut self, needle: impl Into<String>) -> Self {
        self.role_contains = Some(needle.into());
        self
    }

    pub fn with_location(mut self, needle: impl Into<String>) -> Self {
        self.location_contains = Some(needle.into());
        self
    }

    /// Active substring predicates, trimmed, in a fixed field order
    pub fn substring_predicates(&self) -> Vec<(TextField, &str)> {
        [
            (TextField::Qualifications, &self.qualifications_contains),
            (TextField::WorkType, &self.work_type_contains),
            (TextField::JobTitle, &self.job_title_contains),
            (TextField::Role, &self.role_contains),
            (TextField::Location, &self.location_contains),
        ]
        .into_iter()
        .filter_map(|(field, needle)| {
            let needle = needle.as_deref()?.trim();
            (!needle.is_empty()).then_some((field, needle))
        })
        .collect()
    }

    /// True when applying these criteria keeps every record
    pub fn is_unconstrained(&self) -> bool {
        self.min_experience.is_none() && self.substring_predicates().is_empty()
    }

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: FilterCriteria) -> Self {
        Self {
            min_experience: overrides.min_experience.or(self.min_experience),
            qualifications_contains: overrides
                .qualifications_contains
                .or(self.qualifications_contains),
            work_type_contains: overrides.work_type_contains.or(self.work_type_contains),
            job_title_contains: overrides.job_title_contains.or(self.job_title_contains),
            role_contains: overrides.role_contains.or(self.role_contains),
            location_contains: overrides.location_contains.or(self.location_contains),
        }
    }

    /// Drop substring predicates on columns that no record in `records`
    /// carries; such a predicate imposes no constraint.
    ///
    /// Must be called on the unfiltered input so that every filter in the
    /// pipeline sees the same column set.
    pub fn resolve_against(&self, records: &[CandidateRecord]) -> Self {
        let mut resolved = self.clone();
        let slots = [
            (TextField::Qualifications, &mut resolved.qualifications_contains),
            (TextField::WorkType, &mut resolved.work_type_contains),
            (TextField::JobTitle, &mut resolved.job_title_contains),
            (TextField::Role, &mut resolved.role_contains),
            (TextField::Location, &mut resolved.location_contains),
        ];
        for (field, needle) in slots {
            if needle.is_some() && !records.iter().any(|r| r.text(field).is_some()) {
                debug!(
                    "No candidate has a {} value; skipping predicate",
                    field.header()
                );
                *needle = None;
            }
        }
        resolved
    }

    /// Build the filter pipeline for these criteria
    pub fn to_pipeline(&self) -> FilterPipeline {
        let mut pipeline = FilterPipeline::new();
        if let Some(years) = self.min_experience {
            pipeline = pipeline.add_filter(MinExperienceFilter::new(years));
        }
        for (field, needle) in self.substring_predicates() {
            pipeline = pipeline.add_filter(TextContainsFilter::new(field, needle));
        }
        pipeline
    }
}

/// Keep the records satisfying every active criterion, in input order.
///
/// Never fails and never retries; an empty result is returned as-is.
#[instrument(skip_all, fields(input = records.len()))]
pub fn filter(records: Vec<CandidateRecord>, criteria: &FilterCriteria) -> Vec<CandidateRecord> {
    let pipeline = criteria.resolve_against(&records).to_pipeline();
    let filtered = pipeline.apply(records);
    info!(
        "Filtering complete with {} active predicates, {} candidates remain",
        pipeline.len(),
        filtered.len()
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_predicates_are_ignored() {
        let criteria = FilterCriteria::new().with_role("   ").with_location("");

        assert!(criteria.is_unconstrained());
        assert!(criteria.to_pipeline().is_empty());
    }

    #[test]
    fn test_predicates_are_trimmed() {
        let criteria = FilterCriteria::new().with_job_title("  Web Developer ");

        assert_eq!(
            criteria.substring_predicates(),
            vec![(TextField::JobTitle, "Web Developer")]
        );
    }

    #[test]
    fn test_pipeline_has_one_filter_per_active_field() {
        let criteria = FilterCriteria::new()
            .with_min_experience(3)
            .with_qualifications("PhD")
            .with_location("Santiago");

        assert_eq!(criteria.to_pipeline().len(), 3);
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = FilterCriteria::new().with_min_experience(2).with_role("Nurse");
        let overrides = FilterCriteria::new().with_min_experience(5);

        let merged = base.merge(overrides);
        assert_eq!(merged.min_experience, Some(5));
        assert_eq!(merged.role_contains.as_deref(), Some("Nurse"));
    }

    #[test]
    fn test_deserialize_from_json() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"min_experience": 4, "work_type_contains": "Intern"}"#)
                .unwrap();

        assert_eq!(criteria.min_experience, Some(4));
        assert_eq!(criteria.work_type_contains.as_deref(), Some("Intern"));
        assert!(criteria.role_contains.is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let result = serde_json::from_str::<FilterCriteria>(r#"{"min_exp": 4}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_absent_column_is_no_constraint() {
        let records = vec![
            CandidateRecord::new(0).with_experience(3),
            CandidateRecord::new(1).with_experience(7),
        ];

        let kept = filter(records, &FilterCriteria::new().with_role("nurse"));
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_column_presence_is_judged_before_filtering() {
        let records = vec![
            CandidateRecord::new(0)
                .with_experience(2)
                .with_text(TextField::Location, "Santiago"),
            CandidateRecord::new(1).with_experience(8),
        ];

        let location_only = filter(records.clone(), &FilterCriteria::new().with_location("santiago"));
        assert_eq!(location_only.len(), 1);
        assert_eq!(location_only[0].id, 0);

        let criteria = FilterCriteria::new()
            .with_min_experience(5)
            .with_location("santiago");
        assert!(filter(records, &criteria).is_empty());
    }

    #[test]
    fn test_resolve_against_keeps_present_columns() {
        let records = vec![CandidateRecord::new(0)
            .with_experience(2)
            .with_text(TextField::Location, "Lima")];
        let criteria = FilterCriteria::new().with_location("lima").with_role("chef");

        let resolved = criteria.resolve_against(&records);
        assert_eq!(resolved.location_contains.as_deref(), Some("lima"));
        assert_eq!(resolved.role_contains, None);
    }

    #[test]
    fn test_filter_by_qualifications() {
        let records = vec![
            CandidateRecord::new(0)
                .with_experience(3)
                .with_text(TextField::Qualifications, "MBA"),
            CandidateRecord::new(1)
                .with_experience(3)
                .with_text(TextField::Qualifications, "PhD"),
        ];

        let kept = filter(records, &FilterCriteria::new().with_qualifications("phd"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }
}
