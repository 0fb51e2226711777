use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use stats_core::labels::{HeroNames, LabelTables, HERO_CATEGORY};
use stats_core::settings::{ContinuityArgs, CorrelationArgs, HistogramArgs};
use stats_core::time_utils::{resolve_timezone, WEEK_SECS};
use stats_core::StatsError;
use stats_data::aligner::align_all;
use stats_data::continuity::find_misalignments;
use stats_data::correlations::collect_correlations;
use stats_data::ingest::ingest_lines;
use stats_data::reader::LineSource;
use stats_report::csv_view::HistogramReport;
use stats_report::text_view::{write_correlations, write_misalignments};

/// Weekly histogram tables for every category in `args.dir`.
///
/// The hero table is only loaded when a hero category is actually printed.
pub fn run_histogram<W: Write>(
    args: &HistogramArgs,
    hero_names: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let tz = resolve_timezone(&args.timezone)?;

    let report = ingest_lines(LineSource::open(&args.dir)?)?;
    if !report.skipped.is_empty() {
        tracing::info!(
            "Skipped {} records with a zero start time",
            report.skipped.len()
        );
    }

    let mut aligned = align_all(&report.grouped, WEEK_SECS)?;
    if let Some(category) = &args.category {
        aligned.retain(|name, _| name == category);
        if aligned.is_empty() {
            tracing::warn!("Category {} not found in {}", category, args.dir.display());
        }
    }

    let heroes = if aligned.contains_key(HERO_CATEGORY) {
        Some(HeroNames::from_config(hero_names)?)
    } else {
        None
    };
    let tables = LabelTables::build(heroes);

    HistogramReport::new(&tables, args.allow_unknown, tz).write_all(out, &aligned)?;
    Ok(())
}

/// Hero correlations from `args.dir`, weakest first.
pub fn run_correlations<W: Write>(
    args: &CorrelationArgs,
    hero_names: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let heroes = HeroNames::from_config(hero_names)?;
    let correlations = collect_correlations(LineSource::open(&args.dir)?, &heroes)?;
    write_correlations(out, &correlations)?;
    Ok(())
}

/// Continuity report for a file listing, read from `args.listing` or `stdin`.
pub fn run_continuity<R: BufRead, W: Write>(
    args: &ContinuityArgs,
    stdin: R,
    out: &mut W,
) -> Result<()> {
    let gaps = match &args.listing {
        Some(path) => find_misalignments(
            LineSource::from_files(vec![path.clone()]).map(|line| line.map(|l| l.text)),
        )?,
        None => find_misalignments(stdin.lines().map(|l| l.map_err(StatsError::from)))?,
    };
    if gaps.is_empty() {
        tracing::info!("All match files are contiguous");
    }
    write_misalignments(out, &gaps)?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
