use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the match-stats tools.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input directory does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// An input line does not match the expected record layout.
    ///
    /// `line_no` is 1-based within `path`.
    #[error("Malformed record at {path}:{line_no} ({reason}): {line}")]
    MalformedRecord {
        path: PathBuf,
        line_no: usize,
        line: String,
        reason: String,
    },

    /// The observations of one category span more than a bucket axis can
    /// hold, either by overflowing `i64` or by exceeding the bucket cap.
    #[error("Cannot bucket span {min_x}..={max_x} at interval {interval}: {reason}")]
    AxisSpan {
        min_x: i64,
        max_x: i64,
        interval: i64,
        reason: String,
    },

    /// Summing the counts that fall into one bucket overflowed.
    #[error("Count overflow in bucket starting at {bucket_start} for key {key}")]
    CountOverflow { key: String, bucket_start: i64 },

    /// A bucket start time has no calendar date.
    #[error("Timestamp {0} is outside the renderable date range")]
    TimestampOutOfRange(i64),

    /// A numeric code has no label in the given table and unknown codes
    /// were not allowed.
    #[error("Unknown {table} code: {code}")]
    UnknownLabel { table: &'static str, code: i64 },

    /// A key in a translatable category is not an integer code.
    #[error("Key {key:?} in category {category} is not a numeric code")]
    NonNumericKey { category: String, key: String },

    /// A required environment setting is absent.
    #[error("Missing configuration: {0} is not set")]
    MissingConfig(&'static str),

    /// The hero name table could not be loaded.
    #[error("Failed to load hero names from {path}: {reason}")]
    HeroTable { path: PathBuf, reason: String },

    /// A configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the stats crates.
pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StatsError::FileRead {
            path: PathBuf::from("/some/part-00000"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/part-00000"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_data_path_not_found() {
        let err = StatsError::DataPathNotFound(PathBuf::from("/missing/dir"));
        assert_eq!(err.to_string(), "Data path not found: /missing/dir");
    }

    #[test]
    fn test_error_display_malformed_record() {
        let err = StatsError::MalformedRecord {
            path: PathBuf::from("/out/part-00001"),
            line_no: 3,
            line: "game_mode,1,abc,2000,5".to_string(),
            reason: "interval_start is not an integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed record at /out/part-00001:3 (interval_start is not an integer): game_mode,1,abc,2000,5"
        );
    }

    #[test]
    fn test_error_display_axis_span() {
        let err = StatsError::AxisSpan {
            min_x: 1,
            max_x: 9_000_000,
            interval: 10,
            reason: "too many buckets".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot bucket span 1..=9000000 at interval 10: too many buckets"
        );
    }

    #[test]
    fn test_error_display_timestamp_out_of_range() {
        let err = StatsError::TimestampOutOfRange(i64::MAX);
        assert!(err.to_string().contains("outside the renderable date range"));
    }

    #[test]
    fn test_error_display_unknown_label() {
        let err = StatsError::UnknownLabel {
            table: "game mode",
            code: 99,
        };
        assert_eq!(err.to_string(), "Unknown game mode code: 99");
    }

    #[test]
    fn test_error_display_non_numeric_key() {
        let err = StatsError::NonNumericKey {
            category: "lobby_type".to_string(),
            key: "ranked".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Key \"ranked\" in category lobby_type is not a numeric code"
        );
    }

    #[test]
    fn test_error_display_missing_config() {
        let err = StatsError::MissingConfig("WIBIDOTA_HERO_NAMES");
        assert_eq!(
            err.to_string(),
            "Missing configuration: WIBIDOTA_HERO_NAMES is not set"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = StatsError::Config("interval must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: interval must be positive"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StatsError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: StatsError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
