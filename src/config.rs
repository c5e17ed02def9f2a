//! Runtime settings shared by the CLI subcommands.

use anyhow::{Result, bail};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str =
    "https://economictimes.indiatimes.com/markets/rssfeeds/1977021501.cms";
pub const DEFAULT_PRICE_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_EXCHANGE_SUFFIX: &str = ".NS";
pub const DEFAULT_MARKET_INDEX: &str = "^NSEI";
pub const DEFAULT_INTERVAL_MINUTES: u64 = 15;
pub const DEFAULT_POLL_SECONDS: u64 = 1;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Longest accepted refresh interval: one week.
pub const MAX_INTERVAL_MINUTES: u64 = 7 * 24 * 60;
/// Longest accepted poll granularity: one week.
pub const MAX_POLL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Output sinks a pass can be handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum EmitterKind {
    /// Human-readable summary through the log
    Console,
    /// Text and HTML report files
    Report,
    /// SVG bar chart of per-item scores
    Chart,
    /// One CSV row per pass appended to a history file
    History,
    /// Pretty-printed JSON copy of the full result
    Json,
}

pub fn default_emitters() -> Vec<EmitterKind> {
    vec![EmitterKind::Console, EmitterKind::Report, EmitterKind::Chart]
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub feed_url: String,
    pub price_base_url: String,
    pub exchange_suffix: String,
    pub market_index: String,
    pub interval_minutes: u64,
    pub poll_seconds: u64,
    pub timeout_seconds: u64,
    pub output_dir: PathBuf,
    pub emitters: Vec<EmitterKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            price_base_url: DEFAULT_PRICE_BASE_URL.to_string(),
            exchange_suffix: DEFAULT_EXCHANGE_SUFFIX.to_string(),
            market_index: DEFAULT_MARKET_INDEX.to_string(),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            poll_seconds: DEFAULT_POLL_SECONDS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            output_dir: PathBuf::from("."),
            emitters: default_emitters(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_INTERVAL_MINUTES).contains(&self.interval_minutes) {
            bail!("refresh interval must be between 1 and {MAX_INTERVAL_MINUTES} minutes");
        }
        if !(1..=MAX_POLL_SECONDS).contains(&self.poll_seconds) {
            bail!("poll granularity must be between 1 and {MAX_POLL_SECONDS} seconds");
        }
        if self.emitters.is_empty() {
            bail!("at least one emitter must be selected");
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        self.interval_minutes
            .checked_mul(60)
            .map_or(Duration::MAX, Duration::from_secs)
    }

    pub fn poll(&self) -> Duration {
        Duration::from_secs(self.poll_seconds)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.interval(), Duration::from_secs(900));
        assert_eq!(settings.poll(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let settings = Settings {
            interval_minutes: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_poll_is_rejected() {
        let settings = Settings {
            poll_seconds: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_interval_and_poll_above_one_week_are_rejected() {
        let week = Settings {
            interval_minutes: MAX_INTERVAL_MINUTES,
            poll_seconds: MAX_POLL_SECONDS,
            ..Default::default()
        };
        assert!(week.validate().is_ok());

        let huge_interval = Settings {
            interval_minutes: u64::MAX / 60,
            ..Default::default()
        };
        assert!(huge_interval.validate().is_err());

        let huge_poll = Settings {
            poll_seconds: MAX_POLL_SECONDS + 1,
            ..Default::default()
        };
        assert!(huge_poll.validate().is_err());
    }

    #[test]
    fn test_interval_saturates_instead_of_overflowing() {
        let settings = Settings {
            interval_minutes: u64::MAX,
            ..Default::default()
        };
        assert_eq!(settings.interval(), Duration::MAX);
    }

    #[test]
    fn test_no_emitters_is_rejected() {
        let settings = Settings {
            emitters: vec![],
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_emitter_kind_parses_from_cli_value() {
        assert_eq!(
            EmitterKind::from_str("history", true).unwrap(),
            EmitterKind::History
        );
        assert!(EmitterKind::from_str("pdf", true).is_err());
    }
}
