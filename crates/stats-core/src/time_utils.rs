use chrono::{DateTime, TimeZone as _};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{Result, StatsError};

/// Width of one histogram bucket: one week, in seconds.
pub const WEEK_SECS: i64 = 60 * 60 * 24 * 7;

/// Calendar date format used for bucket headers (`MM-DD-YYYY`).
pub const DATE_FORMAT: &str = "%m-%d-%Y";

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve a `--timezone` value into a [`Tz`].
///
/// `"auto"` resolves to the system timezone. Unknown names are a
/// configuration error rather than a silent fallback, since they change every
/// rendered date.
pub fn resolve_timezone(name: &str) -> Result<Tz> {
    resolve_timezone_with(name, get_system_timezone)
}

/// [`resolve_timezone`] with the system zone supplied by `system`.
pub fn resolve_timezone_with(name: &str, system: impl FnOnce() -> String) -> Result<Tz> {
    let resolved = if name.eq_ignore_ascii_case("auto") {
        system()
    } else {
        name.to_string()
    };

    resolved.parse::<Tz>().map_err(|_| {
        warn!("Unrecognised timezone \"{}\"", resolved);
        StatsError::Config(format!("unknown timezone: {}", resolved))
    })
}

// ── Date rendering ────────────────────────────────────────────────────────────

/// Render a Unix timestamp (seconds) as `MM-DD-YYYY` in `tz`.
///
/// Returns `None` for timestamps outside chrono's representable range.
///
/// # Examples
///
/// ```
/// use stats_core::time_utils::format_bucket_date;
///
/// assert_eq!(format_bucket_date(0, chrono_tz::UTC).as_deref(), Some("01-01-1970"));
/// assert_eq!(
///     format_bucket_date(1_370_000_000, chrono_tz::UTC).as_deref(),
///     Some("05-31-2013")
/// );
/// ```
pub fn format_bucket_date(timestamp: i64, tz: Tz) -> Option<String> {
    let utc = DateTime::from_timestamp(timestamp, 0)?;
    Some(
        tz.from_utc_datetime(&utc.naive_utc())
            .format(DATE_FORMAT)
            .to_string(),
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
