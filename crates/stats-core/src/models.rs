use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

/// One `(timestamp, count)` observation for a single key.
pub type Observation = (i64, i64);

/// Per-key observations for one category, in insertion order.
pub type KeyObservations = BTreeMap<String, Vec<Observation>>;

/// A single `field,value,interval_start,interval_end,count` line as produced
/// by the histogram job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRecord {
    /// Category name, e.g. `"game_mode"`.
    pub field: String,
    /// Key within the category, e.g. a game-mode code.
    pub value: String,
    /// Unix timestamp (seconds) at which the counted interval starts.
    pub interval_start: i64,
    /// Unix timestamp (seconds) at which the counted interval ends.
    pub interval_end: i64,
    /// Number of events counted in the interval.
    pub count: i64,
}

/// Why a line could not be read as a [`CountRecord`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("{0} is not an integer")]
    NotInteger(&'static str),
}

impl FromStr for CountRecord {
    type Err = RecordError;

    /// Parse one raw line. Trailing whitespace (including `\r`) is ignored.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.trim_end().split(',').collect();
        let &[field, value, start, end, count] = parts.as_slice() else {
            return Err(RecordError::FieldCount {
                expected: Self::FIELD_COUNT,
                found: parts.len(),
            });
        };

        let int_field = |raw: &str, name: &'static str| {
            raw.parse::<i64>().map_err(|_| RecordError::NotInteger(name))
        };

        Ok(Self {
            field: field.to_string(),
            value: value.to_string(),
            interval_start: int_field(start, "interval_start")?,
            interval_end: int_field(end, "interval_end")?,
            count: int_field(count, "count")?,
        })
    }
}

impl CountRecord {
    /// Number of comma-separated fields in a record line.
    pub const FIELD_COUNT: usize = 5;

    /// A zero start time is an upstream artifact; such records are never
    /// aggregated.
    pub fn has_zero_start(&self) -> bool {
        self.interval_start == 0
    }
}

/// Raw observations grouped by category, then by key.
///
/// Observations for the same key are kept in arrival order and are not summed
/// here; summation happens when the series is bucketed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedCounts {
    categories: BTreeMap<String, KeyObservations>,
}

impl GroupedCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the record's `(interval_start, count)` to its category/key,
    /// creating both levels on first use.
    pub fn add(&mut self, record: &CountRecord) {
        self.categories
            .entry(record.field.clone())
            .or_default()
            .entry(record.value.clone())
            .or_default()
            .push((record.interval_start, record.count));
    }

    /// Observations for one category, if any record named it.
    pub fn category(&self, name: &str) -> Option<&KeyObservations> {
        self.categories.get(name)
    }

    /// Iterate categories in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &KeyObservations)> {
        self.categories.iter()
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of observations across all categories and keys.
    pub fn observation_count(&self) -> usize {
        self.categories
            .values()
            .flat_map(|keys| keys.values())
            .map(Vec::len)
            .sum()
    }
}

/// Dense per-key counts aligned on one shared axis of bucket start times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketedSeries {
    /// Bucket start times shared by every key.
    pub axis: Vec<i64>,
    /// Per-key counts; every vector has `axis.len()` entries.
    pub counts: BTreeMap<String, Vec<i64>>,
}

impl BucketedSeries {
    /// `(timestamp, count)` pairs for one key, positionally matching `axis`.
    pub fn points(&self, key: &str) -> Option<Vec<Observation>> {
        self.counts
            .get(key)
            .map(|values| self.axis.iter().copied().zip(values.iter().copied()).collect())
    }

    /// Sum of all buckets for one key.
    pub fn total(&self, key: &str) -> Option<i64> {
        self.counts.get(key).map(|values| values.iter().sum())
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }
}
