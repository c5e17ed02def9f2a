//! The instrument a pipeline run is about: one stock symbol or the broad market.

use anyhow::{Result, bail};
use serde::Serialize;
use std::fmt;

/// Artifact key used for [`TargetMode::Market`] output files.
pub const MARKET_KEY: &str = "market";

/// Token that ends the interactive prompt loop.
pub const EXIT_TOKEN: &str = "exit";

/// What a pipeline run analyzes. Fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "symbol", rename_all = "lowercase")]
pub enum TargetMode {
    Stock(String),
    Market,
}

impl TargetMode {
    /// Builds a target from user input. Blank input selects [`TargetMode::Market`];
    /// anything else is trimmed and uppercased into a stock symbol.
    ///
    /// # Errors
    ///
    /// Rejects symbols with characters outside `A-Z 0-9 & . _ -`, since the
    /// symbol ends up in file names and in the price request path.
    pub fn from_input(input: Option<&str>) -> Result<Self> {
        let symbol = match input.map(str::trim) {
            Some(s) if !s.is_empty() => s.to_uppercase(),
            _ => return Ok(TargetMode::Market),
        };
        if let Some(bad) = symbol.chars().find(|c| !is_symbol_char(*c)) {
            bail!("invalid character {bad:?} in symbol {symbol:?}");
        }
        Ok(TargetMode::Stock(symbol))
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            TargetMode::Stock(symbol) => Some(symbol),
            TargetMode::Market => None,
        }
    }

    /// Key that names this target's output artifacts. Distinct targets never share one.
    pub fn artifact_key(&self) -> &str {
        self.symbol().unwrap_or(MARKET_KEY)
    }

    /// Instrument name queried from the price collaborator.
    pub fn instrument(&self, exchange_suffix: &str, market_index: &str) -> String {
        match self {
            TargetMode::Stock(symbol) => format!("{symbol}{exchange_suffix}"),
            TargetMode::Market => market_index.to_string(),
        }
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetMode::Stock(symbol) => write!(f, "Stock: {symbol}"),
            TargetMode::Market => write!(f, "Market (NSE/BSE)"),
        }
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '&' | '.' | '_' | '-')
}

/// A single answer read from the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptChoice {
    Exit,
    Analyze(TargetMode),
}

pub fn parse_prompt(line: &str) -> Result<PromptChoice> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case(EXIT_TOKEN) {
        Ok(PromptChoice::Exit)
    } else {
        TargetMode::from_input(Some(trimmed)).map(PromptChoice::Analyze)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_market() {
        assert_eq!(TargetMode::from_input(None).unwrap(), TargetMode::Market);
        assert_eq!(
            TargetMode::from_input(Some("   ")).unwrap(),
            TargetMode::Market
        );
    }

    #[test]
    fn test_symbol_is_trimmed_and_uppercased() {
        assert_eq!(
            TargetMode::from_input(Some(" reliance ")).unwrap(),
            TargetMode::Stock("RELIANCE".into())
        );
    }

    #[test]
    fn test_symbols_with_exchange_punctuation_are_accepted() {
        assert_eq!(
            TargetMode::from_input(Some("m&m")).unwrap(),
            TargetMode::Stock("M&M".into())
        );
        assert_eq!(
            TargetMode::from_input(Some("bajaj-auto")).unwrap(),
            TargetMode::Stock("BAJAJ-AUTO".into())
        );
        assert!(TargetMode::from_input(Some("NIFTY_50.BO")).is_ok());
    }

    #[test]
    fn test_symbols_that_escape_paths_or_urls_are_rejected() {
        for input in ["../etc", "TCS/INFY", "INFY?range=max", "RIL#x", "TATA MOTORS", "Ä"] {
            assert!(
                TargetMode::from_input(Some(input)).is_err(),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_artifact_keys_do_not_collide() {
        let stock = TargetMode::Stock("TCS".into());
        assert_eq!(stock.artifact_key(), "TCS");
        assert_eq!(TargetMode::Market.artifact_key(), "market");
    }

    #[test]
    fn test_instrument_names() {
        let stock = TargetMode::Stock("RELIANCE".into());
        assert_eq!(stock.instrument(".NS", "^NSEI"), "RELIANCE.NS");
        assert_eq!(TargetMode::Market.instrument(".NS", "^NSEI"), "^NSEI");
    }

    #[test]
    fn test_parse_prompt() {
        assert_eq!(parse_prompt("EXIT\n").unwrap(), PromptChoice::Exit);
        assert_eq!(parse_prompt("Exit").unwrap(), PromptChoice::Exit);
        assert_eq!(
            parse_prompt("\n").unwrap(),
            PromptChoice::Analyze(TargetMode::Market)
        );
        assert_eq!(
            parse_prompt("infy").unwrap(),
            PromptChoice::Analyze(TargetMode::Stock("INFY".into()))
        );
        assert!(parse_prompt("infy/../x").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(TargetMode::Stock("TCS".into()).to_string(), "Stock: TCS");
        assert_eq!(TargetMode::Market.to_string(), "Market (NSE/BSE)");
    }
}
