use chrono::{DateTime, Local};

use crate::analyzers::types::{AnalysisResult, SentimentRecord, SentimentSummary};
use crate::services::price_api::PriceObservation;
use crate::target::TargetMode;

/// Attaches a price observation to the aggregated sentiment of a pass.
///
/// An absent price is carried through as `None`; it never affects the
/// sentiment fields.
pub fn correlate(
    target: TargetMode,
    timestamp: DateTime<Local>,
    records: Vec<SentimentRecord>,
    summary: SentimentSummary,
    price: PriceObservation,
) -> AnalysisResult {
    AnalysisResult {
        target,
        timestamp,
        price: price.price,
        price_symbol: price.symbol,
        records,
        average_sentiment: summary.average_sentiment,
        label: summary.label,
    }
}
