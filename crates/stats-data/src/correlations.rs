//! Hero correlation triples (`hero_id,hero_id,value`).

use stats_core::error::Result;
use stats_core::labels::{HeroNames, LabelLookup};
use tracing::debug;

use crate::reader::SourceLine;

/// One correlation between two heroes, with ids already translated.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroCorrelation {
    pub hero_a: String,
    pub hero_b: String,
    pub value: f64,
}

/// Read correlation lines, drop `NaN` values, translate hero ids and sort by
/// absolute value, weakest first.
///
/// Unknown hero ids are rendered as `UNKNOWN`.
pub fn collect_correlations<I>(lines: I, heroes: &HeroNames) -> Result<Vec<HeroCorrelation>>
where
    I: IntoIterator<Item = Result<SourceLine>>,
{
    let mut correlations = Vec::new();
    let mut dropped = 0usize;

    for line in lines {
        let line = line?;
        let trimmed = line.text.trim_end();
        if trimmed.is_empty() {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').collect();
        let &[a, b, value] = parts.as_slice() else {
            return Err(line.malformed("expected 3 fields"));
        };

        let value: f64 = value
            .parse()
            .map_err(|_| line.malformed("value is not a number"))?;
        if value.is_nan() {
            dropped += 1;
            continue;
        }

        let hero_id = |raw: &str| {
            raw.parse::<i64>()
                .map_err(|_| line.malformed("hero id is not an integer"))
        };

        correlations.push(HeroCorrelation {
            hero_a: heroes.label(hero_id(a)?, true)?,
            hero_b: heroes.label(hero_id(b)?, true)?,
            value,
        });
    }

    correlations.sort_by(|x, y| x.value.abs().total_cmp(&y.value.abs()));
    debug!(
        "Collected {} correlations, dropped {} NaN values",
        correlations.len(),
        dropped
    );

    Ok(correlations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::numbered_lines as ok_lines;
    use stats_core::error::StatsError;

    fn heroes() -> HeroNames {
        HeroNames::from_json(
            r#"{"heroes": [
                {"id": 1, "localized_name": "Anti-Mage"},
                {"id": 2, "localized_name": "Axe"},
                {"id": 3, "localized_name": "Bane"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_sorted_by_absolute_value() {
        let result = collect_correlations(
            ok_lines(&["1,2,0.5", "1,3,-0.9", "2,3,0.1"]),
            &heroes(),
        )
        .unwrap();

        let values: Vec<f64> = result.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![0.1, 0.5, -0.9]);
        assert_eq!(result[2].hero_a, "Anti-Mage");
        assert_eq!(result[2].hero_b, "Bane");
    }

    #[test]
    fn test_nan_values_dropped() {
        let result =
            collect_correlations(ok_lines(&["1,2,NaN", "2,3,0.3"]), &heroes()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].hero_a, "Axe");
    }

    #[test]
    fn test_unknown_hero_is_tolerated() {
        let result = collect_correlations(ok_lines(&["1,999,0.2"]), &heroes()).unwrap();
        assert_eq!(result[0].hero_b, "UNKNOWN");
    }

    #[test]
    fn test_wrong_arity_is_fatal() {
        let err = collect_correlations(ok_lines(&["1,2,0.3", "1,2"]), &heroes()).unwrap_err();
        assert!(matches!(err, StatsError::MalformedRecord { line_no: 2, .. }));
    }

    #[test]
    fn test_bad_value_is_fatal() {
        let err = collect_correlations(ok_lines(&["1,2,strong"]), &heroes()).unwrap_err();
        assert!(matches!(err, StatsError::MalformedRecord { .. }));
    }

    #[test]
    fn test_bad_hero_id_is_fatal() {
        assert!(collect_correlations(ok_lines(&["axe,2,0.4"]), &heroes()).is_err());
    }
}
