//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod min_experience;
pub mod text_contains;

// Re-export for convenience
pub use min_experience::MinExperienceFilter;
pub use text_contains::TextContainsFilter;
