//! Data types produced by one pipeline pass.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::analyzers::label::SentimentLabel;
use crate::target::TargetMode;

/// The score of one admitted news item. `relevance_note` is empty unless the
/// item came through the fallback tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRecord {
    pub title: String,
    pub score: f64,
    pub published_at: String,
    pub relevance_note: String,
}

/// Mean score of a non-empty set of records and its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentSummary {
    pub average_sentiment: f64,
    pub label: SentimentLabel,
}

/// Everything one pass produced, handed to the emitters and then dropped.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub target: TargetMode,
    pub timestamp: DateTime<Local>,
    pub price: Option<f64>,
    pub price_symbol: String,
    pub records: Vec<SentimentRecord>,
    pub average_sentiment: f64,
    pub label: SentimentLabel,
}
