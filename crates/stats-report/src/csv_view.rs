//! CSV rendering of aligned weekly series.
//!
//! Each category becomes one table: a header row `X,<date>,<date>,...`
//! followed by one `<label>,<count>,<count>,...` row per key.

use std::collections::BTreeMap;
use std::io::Write;

use chrono_tz::Tz;
use stats_core::error::{Result, StatsError};
use stats_core::labels::LabelTables;
use stats_core::models::BucketedSeries;
use stats_core::time_utils::format_bucket_date;
use tracing::debug;

/// First cell of the header row.
pub const HEADER_LABEL: &str = "X";

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub label: String,
    pub values: Vec<String>,
}

impl OutputRow {
    /// Comma-joined line without a trailing newline.
    pub fn to_csv(&self) -> String {
        std::iter::once(self.label.as_str())
            .chain(self.values.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Renders bucketed series with a fixed label policy.
///
/// The label tables and the unknown-code policy are chosen by the caller and
/// never changed here.
pub struct HistogramReport<'a> {
    labels: &'a LabelTables,
    allow_unknown: bool,
    tz: Tz,
}

impl<'a> HistogramReport<'a> {
    pub fn new(labels: &'a LabelTables, allow_unknown: bool, tz: Tz) -> Self {
        Self {
            labels,
            allow_unknown,
            tz,
        }
    }

    /// `X` followed by every bucket start as `MM-DD-YYYY`.
    pub fn header_row(&self, series: &BucketedSeries) -> Result<OutputRow> {
        let values = series
            .axis
            .iter()
            .map(|&ts| format_bucket_date(ts, self.tz).ok_or(StatsError::TimestampOutOfRange(ts)))
            .collect::<Result<Vec<_>>>()?;

        Ok(OutputRow {
            label: HEADER_LABEL.to_string(),
            values,
        })
    }

    /// One row per key, labelled through the category's lookup.
    pub fn key_rows(&self, category: &str, series: &BucketedSeries) -> Result<Vec<OutputRow>> {
        series
            .counts
            .iter()
            .map(|(key, counts)| {
                Ok(OutputRow {
                    label: self.labels.translate(category, key, self.allow_unknown)?,
                    values: counts.iter().map(i64::to_string).collect(),
                })
            })
            .collect()
    }

    /// Write the header and key rows of one category.
    pub fn write_category<W: Write>(
        &self,
        out: &mut W,
        category: &str,
        series: &BucketedSeries,
    ) -> Result<()> {
        let header = self.header_row(series)?;
        let rows = self.key_rows(category, series)?;

        writeln!(out, "{}", header.to_csv())?;
        for row in &rows {
            writeln!(out, "{}", row.to_csv())?;
        }

        debug!("Wrote {} rows for category {}", rows.len(), category);
        Ok(())
    }

    /// Write every category in name order, separated by a blank line.
    pub fn write_all<W: Write>(
        &self,
        out: &mut W,
        categories: &BTreeMap<String, BucketedSeries>,
    ) -> Result<()> {
        for (idx, (category, series)) in categories.iter().enumerate() {
            if idx > 0 {
                writeln!(out)?;
            }
            self.write_category(out, category, series)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
