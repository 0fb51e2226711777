//! Fixed-interval bucketing of sparse per-key observations onto a shared
//! time axis.
//!
//! For one category the axis starts at the earliest observation of any key
//! and steps by `interval` up to, but never past, the latest observation. The
//! final partial interval gets its own bucket, so every observation lands in
//! exactly one bucket.

use std::collections::BTreeMap;

use stats_core::error::{Result, StatsError};
use stats_core::models::{BucketedSeries, GroupedCounts, KeyObservations};
use tracing::debug;

// ── Axis ──────────────────────────────────────────────────────────────────────

/// Earliest and latest timestamp across every key, or `None` when there are
/// no observations at all.
pub fn time_span(keys: &KeyObservations) -> Option<(i64, i64)> {
    keys.values().flatten().fold(None, |span, &(ts, _)| match span {
        None => Some((ts, ts)),
        Some((lo, hi)) => Some((lo.min(ts), hi.max(ts))),
    })
}

/// Upper bound on the number of buckets in one category's axis.
///
/// At the weekly interval this is close to two thousand years of data.
pub const MAX_BUCKETS: usize = 100_000;

fn span_error(min_x: i64, max_x: i64, interval: i64, reason: impl Into<String>) -> StatsError {
    StatsError::AxisSpan {
        min_x,
        max_x,
        interval,
        reason: reason.into(),
    }
}

/// Bucket index of `timestamp` relative to `min_x`.
///
/// Fails when `timestamp` precedes `min_x` or the offset does not fit.
pub fn bucket_index(timestamp: i64, min_x: i64, interval: i64) -> Result<usize> {
    let offset = timestamp
        .checked_sub(min_x)
        .filter(|offset| *offset >= 0)
        .ok_or_else(|| span_error(min_x, timestamp, interval, "timestamp precedes axis start"))?;
    usize::try_from(offset / interval)
        .map_err(|_| span_error(min_x, timestamp, interval, "bucket index does not fit usize"))
}

/// Bucket start times `min_x, min_x + interval, ...` up to the bucket that
/// holds `max_x`.
///
/// Fails on `i64` overflow and when more than [`MAX_BUCKETS`] buckets would
/// be needed.
pub fn bucket_axis(min_x: i64, max_x: i64, interval: i64) -> Result<Vec<i64>> {
    let buckets = bucket_index(max_x, min_x, interval)?
        .checked_add(1)
        .ok_or_else(|| span_error(min_x, max_x, interval, "bucket count overflows"))?;
    if buckets > MAX_BUCKETS {
        return Err(span_error(
            min_x,
            max_x,
            interval,
            format!("{} buckets exceed the limit of {}", buckets, MAX_BUCKETS),
        ));
    }

    (0..buckets as i64)
        .map(|i| {
            i.checked_mul(interval)
                .and_then(|step| min_x.checked_add(step))
                .ok_or_else(|| span_error(min_x, max_x, interval, "bucket start overflows"))
        })
        .collect()
}

fn check_interval(interval: i64) -> Result<()> {
    if interval <= 0 {
        return Err(StatsError::Config(format!(
            "bucket interval must be positive, got {}",
            interval
        )));
    }
    Ok(())
}

// ── Alignment ─────────────────────────────────────────────────────────────────

/// Bucket every key of one category onto the category's shared axis.
///
/// Counts that fall into the same bucket are summed; buckets a key never
/// observed are zero. An empty category yields an empty series.
pub fn align_category(keys: &KeyObservations, interval: i64) -> Result<BucketedSeries> {
    check_interval(interval)?;

    let Some((min_x, max_x)) = time_span(keys) else {
        return Ok(BucketedSeries::default());
    };

    let axis = bucket_axis(min_x, max_x, interval)?;
    let mut counts: BTreeMap<String, Vec<i64>> = BTreeMap::new();

    for (key, observations) in keys {
        let buckets = counts
            .entry(key.clone())
            .or_insert_with(|| vec![0; axis.len()]);
        for &(ts, count) in observations {
            let idx = bucket_index(ts, min_x, interval)?;
            buckets[idx] = buckets[idx]
                .checked_add(count)
                .ok_or_else(|| StatsError::CountOverflow {
                    key: key.clone(),
                    bucket_start: axis[idx],
                })?;
        }
    }

    Ok(BucketedSeries { axis, counts })
}

/// Align every category of `grouped`, keyed by category name.
pub fn align_all(
    grouped: &GroupedCounts,
    interval: i64,
) -> Result<BTreeMap<String, BucketedSeries>> {
    check_interval(interval)?;

    grouped
        .iter()
        .map(|(category, keys)| {
            let series = align_category(keys, interval)?;
            debug!(
                "Category {}: {} keys over {} buckets",
                category,
                series.counts.len(),
                series.axis.len()
            );
            Ok((category.clone(), series))
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
