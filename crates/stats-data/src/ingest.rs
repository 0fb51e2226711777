//! Record ingestion: raw count lines into [`GroupedCounts`].

use stats_core::error::Result;
use stats_core::models::{CountRecord, GroupedCounts};
use tracing::{debug, warn};

use crate::reader::SourceLine;

/// Outcome of one ingestion pass.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Observations grouped by category and key.
    pub grouped: GroupedCounts,
    /// Raw text of every record dropped for a zero start time.
    pub skipped: Vec<String>,
    /// Number of records folded into `grouped`.
    pub accepted: usize,
}

/// Parse every line and group the counts by `(field, value)`.
///
/// Records with a zero `interval_start` are dropped with one warning each.
/// Blank lines are ignored. Any other malformed line, or an error from the
/// line source, aborts ingestion; the error names the file and line.
pub fn ingest_lines<I>(lines: I) -> Result<IngestReport>
where
    I: IntoIterator<Item = Result<SourceLine>>,
{
    let mut report = IngestReport::default();

    for line in lines {
        let line = line?;

        if line.text.trim().is_empty() {
            debug!(
                "Ignoring blank line {}:{}",
                line.path.display(),
                line.line_no
            );
            continue;
        }

        let record: CountRecord = line.text.parse().map_err(|e| line.malformed(e))?;
        if record.has_zero_start() {
            let raw = line.text.trim_end().to_string();
            warn!("Skipping record with zero start time (line: {})", raw);
            report.skipped.push(raw);
            continue;
        }

        report.grouped.add(&record);
        report.accepted += 1;
    }

    debug!(
        "Ingested {} records, skipped {} with zero start time",
        report.accepted,
        report.skipped.len()
    );

    Ok(report)
}
