//! Filter enforcing a minimum number of experience years.

use crate::traits::Filter;
use data_loader::CandidateRecord;

/// Keeps candidates with `experience_years >= min_years`.
pub struct MinExperienceFilter {
    min_years: u32,
}

impl MinExperienceFilter {
    pub fn new(min_years: u32) -> Self {
        Self { min_years }
    }
}

impl Filter for MinExperienceFilter {
    fn name(&self) -> &str {
        "MinExperienceFilter"
    }

    fn apply(&self, candidates: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.experience_years >= self.min_years)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_experience_filter() {
        let candidates = vec![
            CandidateRecord::new(0).with_experience(2),
            CandidateRecord::new(1).with_experience(5),
            CandidateRecord::new(2).with_experience(9),
        ];

        let filter = MinExperienceFilter::new(5);
        let filtered = filter.apply(candidates);

        let ids: Vec<_> = filtered.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_zero_minimum_keeps_everything() {
        let candidates = vec![
            CandidateRecord::new(0).with_experience(1),
            CandidateRecord::new(1).with_experience(0),
        ];

        let filtered = MinExperienceFilter::new(0).apply(candidates);
        assert_eq!(filtered.len(), 2);
    }
}
