//! Output layer for match-stats.
//!
//! Turns aligned series, correlations and continuity gaps into the CSV and
//! plain-text lines written to stdout.

pub mod csv_view;
pub mod text_view;
