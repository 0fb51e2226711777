//! Shared types for the match-stats tools: errors, record models, label
//! tables, date helpers and command-line settings.

pub mod error;
pub mod labels;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{Result, StatsError};
