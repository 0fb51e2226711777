use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::labels::HERO_NAMES_ENV;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Batch tools for match statistics exported by the analytics jobs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "match-stats",
    about = "Batch tools for match statistics exported by the analytics jobs",
    version
)]
pub struct Settings {
    #[command(subcommand)]
    pub command: Command,

    /// Logging level
    #[arg(long, global = true, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// JSON file mapping hero ids to names
    #[arg(long, global = true, env = HERO_NAMES_ENV)]
    pub hero_names: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Bucket per-key counts into weeks and print one CSV table per category
    Histogram(HistogramArgs),
    /// Sort hero correlation triples by strength
    Correlations(CorrelationArgs),
    /// Report gaps between matches_<start>-<end> file ranges
    Continuity(ContinuityArgs),
}

#[derive(Args, Debug, Clone)]
pub struct HistogramArgs {
    /// Directory of field,value,start,end,count files
    pub dir: PathBuf,

    /// Only print this category
    #[arg(long)]
    pub category: Option<String>,

    /// Print UNKNOWN for unrecognised codes instead of failing
    #[arg(long)]
    pub allow_unknown: bool,

    /// Timezone used to render bucket dates ("auto" for the system zone)
    #[arg(long, default_value = "UTC")]
    pub timezone: String,
}

#[derive(Args, Debug, Clone)]
pub struct CorrelationArgs {
    /// Directory of hero_id,hero_id,value files
    pub dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ContinuityArgs {
    /// File listing to check; reads stdin when omitted
    pub listing: Option<PathBuf>,
}

impl Settings {
    /// Effective log level after applying `--debug`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_defaults() {
        let settings = Settings::parse_from(["match-stats", "histogram", "/data/counts"]);

        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.debug);
        match settings.command {
            Command::Histogram(args) => {
                assert_eq!(args.dir, PathBuf::from("/data/counts"));
                assert!(args.category.is_none());
                assert!(!args.allow_unknown);
                assert_eq!(args.timezone, "UTC");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_histogram_flags() {
        let settings = Settings::parse_from([
            "match-stats",
            "histogram",
            "/data",
            "--category",
            "lobby_type",
            "--allow-unknown",
            "--timezone",
            "Europe/Berlin",
        ]);
        let Command::Histogram(args) = settings.command else {
            panic!("expected histogram");
        };
        assert_eq!(args.category.as_deref(), Some("lobby_type"));
        assert!(args.allow_unknown);
        assert_eq!(args.timezone, "Europe/Berlin");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let settings = Settings::parse_from([
            "match-stats",
            "correlations",
            "/data/corr",
            "--debug",
            "--hero-names",
            "/etc/heroes.json",
        ]);
        assert!(settings.debug);
        assert_eq!(settings.effective_log_level(), "DEBUG");
        assert_eq!(settings.hero_names, Some(PathBuf::from("/etc/heroes.json")));
    }

    #[test]
    fn test_continuity_stdin_default() {
        let settings = Settings::parse_from(["match-stats", "continuity"]);
        let Command::Continuity(args) = settings.command else {
            panic!("expected continuity");
        };
        assert!(args.listing.is_none());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result =
            Settings::try_parse_from(["match-stats", "--log-level", "LOUD", "continuity"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand_rejected() {
        assert!(Settings::try_parse_from(["match-stats"]).is_err());
    }
}
