use anyhow::Result;
use tracing::{debug, info};

use super::{Emitter, summary_lines};
use crate::analyzers::types::AnalysisResult;

/// Writes the human-readable summary through the log.
pub struct ConsoleEmitter;

impl Emitter for ConsoleEmitter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn emit(&self, result: &AnalysisResult) -> Result<()> {
        debug!("{:#?}", result);
        info!(
            "Analyzing {} at {}",
            result.target,
            result.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
        for line in summary_lines(result).iter().filter(|l| !l.is_empty()) {
            info!("{line}");
        }
        Ok(())
    }
}
