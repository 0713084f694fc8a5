//! The three orderings behind the consensus.
//!
//! All three sort by descending experience. They differ only in how ties are
//! resolved, and each rule is reproduced exactly:
//! - merge: left half of the midpoint split first
//! - quick: equal-to-pivot group in input order
//! - heap: smaller id first

pub mod heap;
pub mod merge;
pub mod quick;

pub use heap::heap_order;
pub use merge::merge_order;
pub use quick::quick_order;
