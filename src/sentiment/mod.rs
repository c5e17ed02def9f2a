//! Sentiment scoring: the scorer contract and the per-item scoring step.

pub mod lexicon;

pub use lexicon::LexiconScorer;

use crate::analyzers::types::SentimentRecord;
use crate::news::NewsItem;

/// Maps text to a compound polarity in `[-1, 1]`.
///
/// Implementations are stateless and total: every input, including the empty
/// string, yields a score.
pub trait SentimentScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Scores each admitted item's `title + " " + description`, one record per item,
/// in input order. Every call goes to the scorer; nothing is cached.
pub fn score_items(scorer: &dyn SentimentScorer, items: &[NewsItem]) -> Vec<SentimentRecord> {
    items
        .iter()
        .map(|item| SentimentRecord {
            title: item.title.clone(),
            score: scorer.polarity(&item.text()),
            published_at: item.published_at.clone(),
            relevance_note: item.relevance_note.clone().unwrap_or_default(),
        })
        .collect()
}
