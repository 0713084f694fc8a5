//! Case-insensitive substring filter over one text attribute.
//!
//! A candidate missing the attribute does not match. Whether the column
//! exists at all is decided once, on the unfiltered input, by
//! [`FilterCriteria::resolve_against`](crate::FilterCriteria::resolve_against).

use crate::traits::Filter;
use data_loader::{CandidateRecord, TextField};

/// Keeps candidates whose `field`, lower-cased, contains `needle`.
pub struct TextContainsFilter {
    field: TextField,
    needle: String,
    name: String,
}

impl TextContainsFilter {
    /// Create a new TextContainsFilter.
    ///
    /// # Arguments
    /// * `field` - The text attribute to inspect
    /// * `needle` - Substring to look for; compared lower-cased
    pub fn new(field: TextField, needle: &str) -> Self {
        Self {
            field,
            needle: needle.to_lowercase(),
            name: format!("TextContainsFilter({})", field.header()),
        }
    }

    pub fn field(&self) -> TextField {
        self.field
    }
}

impl Filter for TextContainsFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, candidates: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
        candidates
            .into_iter()
            .filter(|candidate| {
                candidate
                    .text(self.field)
                    .is_some_and(|value| value.to_lowercase().contains(&self.needle))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: usize, role: Option<&str>) -> CandidateRecord {
        let record = CandidateRecord::new(id).with_experience(3);
        match role {
            Some(role) => record.with_text(TextField::Role, role),
            None => record,
        }
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let candidates = vec![
            candidate(0, Some("Frontend Web Developer")),
            candidate(1, Some("Data Analyst")),
            candidate(2, Some("WEB designer")),
        ];

        let filtered = TextContainsFilter::new(TextField::Role, "Web").apply(candidates);

        let ids: Vec<_> = filtered.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_missing_value_does_not_match() {
        let candidates = vec![candidate(0, Some("Nurse")), candidate(1, None)];

        let filtered = TextContainsFilter::new(TextField::Role, "nurse").apply(candidates);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 0);
    }

    #[test]
    fn test_all_missing_matches_nothing() {
        let candidates = vec![candidate(0, None), candidate(1, None)];

        let filtered = TextContainsFilter::new(TextField::Role, "nurse").apply(candidates);
        assert!(filtered.is_empty());
    }
}
