//! Plain-text output for the correlation and continuity tools.

use std::io::Write;

use stats_core::error::Result;
use stats_data::continuity::Misalignment;
use stats_data::correlations::HeroCorrelation;

/// One `hero_a,hero_b,value` line per correlation, in the given order.
pub fn write_correlations<W: Write>(out: &mut W, correlations: &[HeroCorrelation]) -> Result<()> {
    for c in correlations {
        writeln!(out, "{},{},{}", c.hero_a, c.hero_b, c.value)?;
    }
    Ok(())
}

/// One `Misalignment <end> to <start>` line per gap.
pub fn write_misalignments<W: Write>(out: &mut W, gaps: &[Misalignment]) -> Result<()> {
    for gap in gaps {
        writeln!(out, "{}", gap)?;
    }
    Ok(())
}
