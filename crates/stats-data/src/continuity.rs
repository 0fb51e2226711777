//! Sequence-number continuity of `matches_<start>-<end>` dump files.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use stats_core::error::Result;
use tracing::debug;

/// Half-open range of match sequence numbers covered by one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeqRange {
    pub start: u64,
    pub end: u64,
}

/// Two consecutive ranges that do not touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misalignment {
    pub prev_end: u64,
    pub cur_start: u64,
}

impl fmt::Display for Misalignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Misalignment {} to {}", self.prev_end, self.cur_start)
    }
}

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"matches_(\d+)-(\d+)(?:\.gz)?\s*$").expect("regex is valid")
    })
}

/// Extract the sequence range from one listing line, if it names a dump file.
///
/// Only the last `matches_` marker on the line is considered.
pub fn parse_range(line: &str) -> Option<SeqRange> {
    let caps = range_pattern().captures(line)?;
    Some(SeqRange {
        start: caps[1].parse().ok()?,
        end: caps[2].parse().ok()?,
    })
}

/// Collect every range in the listing and report each gap or overlap between
/// neighbours after sorting.
pub fn find_misalignments<I>(lines: I) -> Result<Vec<Misalignment>>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut ranges = Vec::new();
    for line in lines {
        if let Some(range) = parse_range(&line?) {
            ranges.push(range);
        }
    }
    ranges.sort();
    debug!("Checking continuity of {} match files", ranges.len());

    Ok(ranges
        .windows(2)
        .filter(|pair| pair[0].end != pair[1].start)
        .map(|pair| Misalignment {
            prev_end: pair[0].end,
            cur_start: pair[1].start,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_lines(lines: &[&str]) -> Vec<Result<String>> {
        lines.iter().map(|l| Ok(l.to_string())).collect()
    }

    #[test]
    fn test_parse_range_plain_and_gz() {
        assert_eq!(
            parse_range("/dota/raw/matches_100-200"),
            Some(SeqRange { start: 100, end: 200 })
        );
        assert_eq!(
            parse_range("-rw-r--r--   3 hdfs  1024 2013-06-01 /dota/matches_200-350.gz"),
            Some(SeqRange { start: 200, end: 350 })
        );
    }

    #[test]
    fn test_parse_range_ignores_other_lines() {
        assert_eq!(parse_range("Found 3 items"), None);
        assert_eq!(parse_range("/dota/raw/players_1-2"), None);
    }

    #[test]
    fn test_contiguous_listing_has_no_misalignments() {
        let result = find_misalignments(ok_lines(&[
            "/d/matches_200-300.gz",
            "/d/matches_100-200.gz",
            "/d/matches_300-400.gz",
        ]))
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_gap_and_overlap_reported() {
        let result = find_misalignments(ok_lines(&[
            "/d/matches_100-200",
            "/d/matches_250-300",
            "/d/matches_290-400",
        ]))
        .unwrap();

        assert_eq!(
            result,
            vec![
                Misalignment { prev_end: 200, cur_start: 250 },
                Misalignment { prev_end: 300, cur_start: 290 },
            ]
        );
        assert_eq!(result[0].to_string(), "Misalignment 200 to 250");
    }

    #[test]
    fn test_single_file_is_continuous() {
        assert!(find_misalignments(ok_lines(&["/d/matches_1-2"])).unwrap().is_empty());
    }
}
