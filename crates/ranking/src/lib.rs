//! # Ranking Crate
//!
//! This crate implements the consensus ranking of filtered candidates.
//!
//! ## Components
//!
//! ### Orderings
//! Three fixed algorithms sort `(id, experience)` keys by descending
//! experience, each with its own tie-break rule:
//! - Merge: midpoint-split merge sort, left half wins ties
//! - Quick: middle-element pivot, three-way partition keeping equal keys in
//!   input order
//! - Heap: max-heap on experience, then smaller id
//!
//! ### RankEngine
//! Turns each ordering into an id → position map and scores every record by
//! the mean of its three positions. The consensus order is ascending score,
//! stable on the filtered-set order.
//!
//! ## Example Usage
//!
//! ```ignore
//! use ranking::RankEngine;
//!
//! let ranking = RankEngine::new().rank(filtered);
//! for entry in ranking.entries() {
//!     println!("{} -> {:.2}", entry.record.id, entry.score);
//! }
//! ```

// Public modules
pub mod consensus;
pub mod orderings;
pub mod types;

// Re-export commonly used types
pub use consensus::{ConsensusRanking, RankEngine};
pub use types::{Algorithm, AlgorithmRanking, ConsensusEntry, RankKey};
