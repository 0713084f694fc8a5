//! # Data Loader Crate
//!
//! This crate turns a tabular candidate source into the normalized working
//! set used by filtering and ranking, and writes tables back out.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RawRecord, CandidateRecord, CandidateTable)
//! - **parser**: Parse CSV, JSON and Excel sources into raw rows
//! - **normalize**: Text cleaning, experience and salary extraction
//! - **table**: Ingestion hygiene and working-set construction
//! - **export**: CSV and xlsx writers
//! - **error**: Error types for loading and writing
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::CandidateTable;
//! use std::path::Path;
//!
//! let table = CandidateTable::load_from_file(Path::new("data/job_candidates.csv"))?;
//! println!("{} candidates with experience", table.len());
//!
//! data_loader::export::write_csv(Path::new("cleaned_candidates.csv"), &table.to_export())?;
//! ```

// Public modules
pub mod error;
pub mod export;
pub mod normalize;
pub mod parser;
pub mod table;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use export::ExportTable;
pub use normalize::Normalizer;
pub use types::{
    CandidateRecord, CandidateTable, RawRecord, RawTable, RecordId, TextField,
    EXPERIENCE_VALUE_COLUMN, SALARY_MID_COLUMN,
};
