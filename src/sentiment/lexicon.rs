//! Rule-based compound polarity scorer with a finance-oriented lexicon.

use std::collections::{HashMap, HashSet};

use super::SentimentScorer;

/// Normalization constant for the compound score: `s / sqrt(s^2 + ALPHA)`.
const ALPHA: f64 = 15.0;

/// Valence multiplier for a term preceded by a negation.
const NEGATION_SCALAR: f64 = -0.74;

/// How many preceding tokens a negation reaches.
const NEGATION_WINDOW: usize = 3;

/// Magnitude added or removed by a booster word.
const BOOSTER_STEP: f64 = 0.293;

/// Valences on a -4..4 scale.
const VALENCES: &[(&str, f64)] = &[
    // positive
    ("bullish", 2.9),
    ("surge", 2.0),
    ("soar", 2.3),
    ("rally", 1.9),
    ("jump", 1.5),
    ("gain", 2.0),
    ("profit", 1.9),
    ("profitable", 2.2),
    ("growth", 1.8),
    ("grow", 1.6),
    ("rise", 1.2),
    ("high", 0.9),
    ("higher", 1.0),
    ("record", 1.2),
    ("beat", 1.4),
    ("exceed", 1.5),
    ("outperform", 1.9),
    ("upgrade", 1.8),
    ("strong", 1.6),
    ("robust", 1.7),
    ("positive", 2.6),
    ("optimistic", 2.3),
    ("confident", 2.2),
    ("recovery", 1.6),
    ("recover", 1.5),
    ("rebound", 1.5),
    ("boost", 1.7),
    ("improve", 1.9),
    ("win", 2.8),
    ("success", 2.7),
    ("good", 1.9),
    ("great", 3.1),
    ("buy", 0.9),
    ("dividend", 0.8),
    ("approval", 1.6),
    ("upbeat", 1.9),
    ("green", 0.6),
    // negative
    ("bearish", -2.9),
    ("crash", -2.7),
    ("plunge", -2.4),
    ("slump", -2.1),
    ("tumble", -2.0),
    ("slip", -1.1),
    ("drop", -1.1),
    ("fall", -1.3),
    ("decline", -1.5),
    ("lower", -1.0),
    ("low", -1.1),
    ("loss", -2.0),
    ("lose", -1.9),
    ("weak", -1.9),
    ("weaken", -1.8),
    ("negative", -2.7),
    ("pessimistic", -2.1),
    ("concern", -1.3),
    ("worry", -1.9),
    ("fear", -2.2),
    ("risk", -1.1),
    ("volatile", -1.2),
    ("volatility", -1.0),
    ("uncertainty", -1.4),
    ("miss", -1.2),
    ("disappoint", -2.1),
    ("underperform", -1.9),
    ("downgrade", -1.8),
    ("sell", -0.6),
    ("selloff", -2.0),
    ("correction", -0.9),
    ("crisis", -3.1),
    ("warning", -1.4),
    ("warn", -1.4),
    ("trouble", -2.0),
    ("fail", -2.3),
    ("fraud", -3.0),
    ("default", -2.0),
    ("penalty", -1.9),
    ("probe", -1.2),
    ("bad", -2.5),
    ("red", -0.5),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nothing", "cannot", "cant", "can't",
    "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "won't", "wont", "isn't", "isnt",
    "aren't", "arent", "wasn't", "wasnt", "without", "hardly", "barely",
];

/// Positive steps intensify, negative steps dampen.
const BOOSTERS: &[(&str, f64)] = &[
    ("very", BOOSTER_STEP),
    ("extremely", BOOSTER_STEP),
    ("highly", BOOSTER_STEP),
    ("sharply", BOOSTER_STEP),
    ("significantly", BOOSTER_STEP),
    ("strongly", BOOSTER_STEP),
    ("massive", BOOSTER_STEP),
    ("huge", BOOSTER_STEP),
    ("slightly", -BOOSTER_STEP),
    ("marginally", -BOOSTER_STEP),
    ("somewhat", -BOOSTER_STEP),
    ("barely", -BOOSTER_STEP),
];

/// Lexicon-driven scorer. Build it once and share it; scoring borrows it immutably.
pub struct LexiconScorer {
    valences: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
    boosters: HashMap<&'static str, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            valences: VALENCES.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
        }
    }

    /// Looks a token up directly, then through common inflection suffixes.
    fn valence(&self, token: &str) -> Option<f64> {
        if let Some(v) = self.valences.get(token) {
            return Some(*v);
        }
        for suffix in ["s", "es", "ed", "d", "ing"] {
            if let Some(stem) = token.strip_suffix(suffix) {
                if let Some(v) = self.valences.get(stem) {
                    return Some(*v);
                }
                if suffix == "ing" {
                    if let Some(v) = self.valences.get(format!("{stem}e").as_str()) {
                        return Some(*v);
                    }
                }
            }
        }
        None
    }

    /// Sum of adjusted valences over all sentiment-bearing tokens.
    fn raw_sum(&self, tokens: &[String]) -> f64 {
        let mut sum = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(mut valence) = self.valence(token) else {
                continue;
            };

            if i > 0 {
                if let Some(step) = self.boosters.get(tokens[i - 1].as_str()) {
                    valence += step * valence.signum();
                }
            }

            let start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[start..i]
                .iter()
                .any(|t| self.negations.contains(t.as_str()))
            {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
        }
        sum
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

impl SentimentScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let sum = self.raw_sum(&tokenize(text));
        if sum == 0.0 {
            return 0.0;
        }
        sum / (sum * sum + ALPHA).sqrt()
    }
}
