//! CSV history of pass summaries, one file per target.

use anyhow::Result;
use chrono::{DateTime, Local};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Emitter;
use crate::analyzers::label::SentimentLabel;
use crate::analyzers::types::AnalysisResult;

/// One row of the history file.
#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub timestamp: DateTime<Local>,
    pub target: String,
    pub price_symbol: String,
    pub price: Option<f64>,
    pub average_sentiment: f64,
    pub label: SentimentLabel,
    pub items: usize,
}

impl HistoryRow {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            timestamp: result.timestamp,
            target: result.target.artifact_key().to_string(),
            price_symbol: result.price_symbol.clone(),
            price: result.price,
            average_sentiment: result.average_sentiment,
            label: result.label,
            items: result.records.len(),
        }
    }
}

/// Appends a [`HistoryRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, row: &HistoryRow) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}

pub struct HistoryEmitter {
    output_dir: PathBuf,
}

impl HistoryEmitter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn history_path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("sentiment_history_{key}.csv"))
    }
}

impl Emitter for HistoryEmitter {
    fn name(&self) -> &'static str {
        "history"
    }

    fn emit(&self, result: &AnalysisResult) -> Result<()> {
        let path = self.history_path(result.target.artifact_key());
        append_record(&path, &HistoryRow::from_result(result))
    }
}
