use crate::analyzers::label::SentimentLabel;
use crate::analyzers::types::{SentimentRecord, SentimentSummary};
use crate::analyzers::utility::mean;

/// Reduces the records of one pass to their mean score and label.
///
/// Returns `None` for an empty slice; callers report "no relevant news"
/// instead of building a result.
pub fn aggregate_sentiment(records: &[SentimentRecord]) -> Option<SentimentSummary> {
    let scores: Vec<f64> = records.iter().map(|r| r.score).collect();
    let average_sentiment = mean(&scores)?;

    Some(SentimentSummary {
        average_sentiment,
        label: SentimentLabel::from_average(average_sentiment),
    })
}
