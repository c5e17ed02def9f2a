use serde::Serialize;
use std::fmt;

/// Average sentiment above this is bullish; below its negation, bearish.
pub const LABEL_THRESHOLD: f64 = 0.05;

/// Directional call derived from an average sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    /// Maps an average sentiment onto a label.
    ///
    /// | Average          | Label   |
    /// |------------------|---------|
    /// | > 0.05           | Bullish |
    /// | < -0.05          | Bearish |
    /// | otherwise        | Neutral |
    pub fn from_average(average: f64) -> Self {
        match average {
            a if a > LABEL_THRESHOLD => SentimentLabel::Bullish,
            a if a < -LABEL_THRESHOLD => SentimentLabel::Bearish,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Bullish => "Bullish",
            SentimentLabel::Bearish => "Bearish",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_boundaries() {
        assert_eq!(SentimentLabel::from_average(1.0), SentimentLabel::Bullish);
        assert_eq!(SentimentLabel::from_average(0.0501), SentimentLabel::Bullish);
        assert_eq!(SentimentLabel::from_average(0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_average(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_average(-0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_average(-0.0501), SentimentLabel::Bearish);
        assert_eq!(SentimentLabel::from_average(-1.0), SentimentLabel::Bearish);
    }

    #[test]
    fn test_display() {
        assert_eq!(SentimentLabel::Bullish.to_string(), "Bullish");
        assert_eq!(SentimentLabel::Neutral.to_string(), "Neutral");
    }
}
