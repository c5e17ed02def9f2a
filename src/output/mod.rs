//! Emitters: where a finished [`AnalysisResult`] goes.
//!
//! Every emitter gets the same result; a failing emitter is logged and does not
//! stop the others. File artifacts are named after [`TargetMode::artifact_key`],
//! so repeated runs for one target overwrite the same files.
//!
//! [`TargetMode::artifact_key`]: crate::target::TargetMode::artifact_key

pub mod chart;
pub mod console;
pub mod history;
pub mod json;
pub mod report;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::error;

use crate::analyzers::types::AnalysisResult;
use crate::config::EmitterKind;

pub use chart::ChartEmitter;
pub use console::ConsoleEmitter;
pub use history::HistoryEmitter;
pub use json::JsonEmitter;
pub use report::ReportEmitter;

pub trait Emitter: Send + Sync {
    fn name(&self) -> &'static str;

    fn emit(&self, result: &AnalysisResult) -> Result<()>;
}

/// Builds the emitters selected in the settings, in the order given.
pub fn build_emitters(kinds: &[EmitterKind], output_dir: &Path) -> Vec<Arc<dyn Emitter>> {
    kinds
        .iter()
        .map(|kind| -> Arc<dyn Emitter> {
            match kind {
                EmitterKind::Console => Arc::new(ConsoleEmitter),
                EmitterKind::Report => Arc::new(ReportEmitter::new(output_dir)),
                EmitterKind::Chart => Arc::new(ChartEmitter::new(output_dir)),
                EmitterKind::History => Arc::new(HistoryEmitter::new(output_dir)),
                EmitterKind::Json => Arc::new(JsonEmitter::new(output_dir)),
            }
        })
        .collect()
}

/// Hands `result` to every emitter. Returns how many succeeded.
pub fn emit_all(emitters: &[Arc<dyn Emitter>], result: &AnalysisResult) -> usize {
    let mut ok = 0;
    for emitter in emitters {
        match emitter.emit(result) {
            Ok(()) => ok += 1,
            Err(e) => error!(emitter = emitter.name(), error = %e, "Emitter failed"),
        }
    }
    ok
}

/// Formats a price for display, `N/A` when absent.
pub fn format_price(price: Option<f64>) -> String {
    price.map_or_else(|| "N/A".to_string(), |p| format!("{p:.2}"))
}

/// Summary lines shared by the console and text report emitters.
pub fn summary_lines(result: &AnalysisResult) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Price ({}): {}",
            result.price_symbol,
            format_price(result.price)
        ),
        String::new(),
        "Sentiment Analysis Results:".to_string(),
    ];
    for record in &result.records {
        let line = format!("- {} (Sentiment: {:.2})", record.title, record.score);
        if record.relevance_note.is_empty() {
            lines.push(line);
        } else {
            lines.push(format!("{line} {}", record.relevance_note));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Average Sentiment: {:.2} ({})",
        result.average_sentiment, result.label
    ));
    lines
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_result;
    use super::*;
    use crate::target::TargetMode;

    struct Failing;

    impl Emitter for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn emit(&self, _result: &AnalysisResult) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(2950.256)), "2950.26");
        assert_eq!(format_price(None), "N/A");
    }

    #[test]
    fn test_summary_lines() {
        let result = sample_result(TargetMode::Stock("RELIANCE".into()), None);
        let lines = summary_lines(&result);

        assert_eq!(lines[0], "Price (RELIANCE.NS): N/A");
        assert!(lines.contains(&"- RELIANCE Q1 profit surges (Sentiment: 0.60)".to_string()));
        assert_eq!(lines.last().unwrap(), "Average Sentiment: 0.17 (Bullish)");
    }

    #[test]
    fn test_failing_emitter_does_not_stop_others() {
        let emitters: Vec<Arc<dyn Emitter>> = vec![Arc::new(Failing), Arc::new(ConsoleEmitter)];
        let result = sample_result(TargetMode::Market, Some(24_000.0));
        assert_eq!(emit_all(&emitters, &result), 1);
    }

    #[test]
    fn test_build_emitters_follows_selection() {
        let dir = std::env::temp_dir();
        let emitters = build_emitters(&[EmitterKind::History, EmitterKind::Console], &dir);
        let names: Vec<_> = emitters.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["history", "console"]);
    }
}
