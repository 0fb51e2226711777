//! Data layer for match-stats.
//!
//! Discovers and reads job output files, parses count records, aligns them
//! into weekly series, and implements the correlation and continuity checks.

pub mod aligner;
pub mod continuity;
pub mod correlations;
pub mod ingest;
pub mod reader;
