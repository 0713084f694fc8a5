//! Pipeline for filtering normalized candidate records.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - FilterCriteria, the caller-facing configuration, and `filter`
//!
//! ## Architecture
//! Criteria are turned into a pipeline of independent filters:
//! 1. MinExperienceFilter keeps candidates with enough years
//! 2. One TextContainsFilter per active substring predicate
//!
//! Each filter preserves order, so the result is an ordered subset of the
//! input. Retrying with different criteria is up to the caller.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{filter, FilterCriteria};
//!
//! let criteria = FilterCriteria::new()
//!     .with_min_experience(3)
//!     .with_location("Santiago");
//!
//! let filtered = filter(table.into_records(), &criteria);
//! if filtered.is_empty() {
//!     // ask for different criteria
//! }
//! ```

pub mod criteria;
pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use criteria::{filter, FilterCriteria};
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
