//! Machine-readable copy of each pass, overwritten per target.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::Emitter;
use crate::analyzers::types::AnalysisResult;

pub struct JsonEmitter {
    output_dir: PathBuf,
}

impl JsonEmitter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("sentiment_results_{key}.json"))
    }
}

impl Emitter for JsonEmitter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn emit(&self, result: &AnalysisResult) -> Result<()> {
        let path = self.path(result.target.artifact_key());
        let body = serde_json::to_string_pretty(result)?;
        std::fs::write(&path, body)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(path = %path.display(), "JSON result saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample_result;
    use crate::target::TargetMode;
    use std::fs;

    #[test]
    fn test_emit_writes_result_as_json() {
        let dir = std::env::temp_dir().join("market_sentiment_test_json");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let emitter = JsonEmitter::new(&dir);

        emitter
            .emit(&sample_result(TargetMode::Stock("RELIANCE".into()), None))
            .unwrap();

        let body = fs::read_to_string(emitter.path("RELIANCE")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["target"]["mode"], "stock");
        assert_eq!(value["target"]["symbol"], "RELIANCE");
        assert_eq!(value["label"], "Bullish");
        assert!(value["price"].is_null());
        assert_eq!(value["records"].as_array().unwrap().len(), 3);
        assert_eq!(value["records"][0]["title"], "RELIANCE Q1 profit surges");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_market_target_serializes_without_symbol() {
        let result = sample_result(TargetMode::Market, Some(24000.5));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["target"], serde_json::json!({ "mode": "market" }));
        assert_eq!(value["price"], 24000.5);
    }
}
