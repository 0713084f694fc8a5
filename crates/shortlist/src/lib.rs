//! Shortlist crate for the candidate shortlist engine.
//!
//! This crate contains the orchestrator that runs filter, rank and shortlist
//! over a loaded working set, plus the shortlist builder and the graceful
//! parsing of shortlist size and export format.

pub mod builder;
pub mod config;
pub mod orchestrator;

pub use builder::{ShortlistBuilder, ShortlistEntry};
pub use config::{ExportFormat, ShortlistConfig, DEFAULT_SHORTLIST_SIZE};
pub use orchestrator::{FilteredSummary, Shortlist, ShortlistOrchestrator};
