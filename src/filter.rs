//! Two-tier keyword relevance filter.
//!
//! The primary tier matches target-specific keywords. For a stock target whose
//! primary tier admits nothing, a fallback tier re-scans the same feed for
//! broad-market keywords and tags every admission with [`FALLBACK_NOTE`].
//! Matching is a case-insensitive substring test over `title + " " + description`,
//! so a short alias can match inside an unrelated word.

use crate::news::NewsItem;
use crate::target::TargetMode;

/// Broad-market keywords: the primary set in market mode and the fallback set
/// in stock mode.
pub const MARKET_KEYWORDS: &[&str] = &["NSE", "BSE", "Indian stock market", "Sensex", "Nifty"];

/// Symbols that also trade under a well-known abbreviation.
pub const SYMBOL_ALIASES: &[(&str, &str)] = &[("RELIANCE", "RIL")];

pub const FALLBACK_NOTE: &str = "Fallback: general market news";

/// Which keyword tier produced the admitted items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Primary,
    Fallback,
    None,
}

#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub admitted: Vec<NewsItem>,
    pub tier: MatchTier,
}

/// Keywords for the primary tier of `target`.
pub fn primary_keywords(target: &TargetMode) -> Vec<String> {
    match target {
        TargetMode::Market => MARKET_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        TargetMode::Stock(symbol) => {
            let base = symbol.to_uppercase();
            let mut keywords = vec![base.clone(), format!("{base} Industries")];
            keywords.extend(
                SYMBOL_ALIASES
                    .iter()
                    .filter(|(s, _)| *s == base)
                    .map(|(_, alias)| alias.to_string()),
            );
            keywords
        }
    }
}

/// Keywords for the fallback tier, if `target` has one.
pub fn fallback_keywords(target: &TargetMode) -> Option<&'static [&'static str]> {
    match target {
        TargetMode::Stock(_) => Some(MARKET_KEYWORDS),
        TargetMode::Market => None,
    }
}

fn matches_any<S: AsRef<str>>(item: &NewsItem, keywords: &[S]) -> bool {
    let text = format!("{} {}", item.title, item.description).to_lowercase();
    keywords
        .iter()
        .any(|k| text.contains(&k.as_ref().to_lowercase()))
}

/// Selects the items relevant to `target`, preserving feed order.
///
/// The fallback tier only runs when the primary tier admitted exactly zero
/// items; the two tiers are never mixed.
pub fn filter_relevant(items: &[NewsItem], target: &TargetMode) -> FilterOutcome {
    let primary = primary_keywords(target);
    let admitted: Vec<NewsItem> = items
        .iter()
        .filter(|item| matches_any(item, &primary))
        .cloned()
        .collect();

    if !admitted.is_empty() {
        return FilterOutcome {
            admitted,
            tier: MatchTier::Primary,
        };
    }

    let Some(fallback) = fallback_keywords(target) else {
        return FilterOutcome {
            admitted,
            tier: MatchTier::None,
        };
    };

    let admitted: Vec<NewsItem> = items
        .iter()
        .filter(|item| matches_any(item, fallback))
        .map(|item| item.clone().with_note(FALLBACK_NOTE))
        .collect();

    let tier = if admitted.is_empty() {
        MatchTier::None
    } else {
        MatchTier::Fallback
    };
    FilterOutcome { admitted, tier }
}
