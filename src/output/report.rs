//! Text and HTML reports, one pair per target, overwritten on every pass.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{Emitter, format_price, summary_lines};
use crate::analyzers::types::AnalysisResult;

pub struct ReportEmitter {
    output_dir: PathBuf,
}

impl ReportEmitter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn text_path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("sentiment_results_{key}.txt"))
    }

    pub fn html_path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("sentiment_results_{key}.html"))
    }
}

fn heading(result: &AnalysisResult) -> String {
    format!(
        "{} Sentiment Analysis - {}",
        result.target,
        result.timestamp.format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = heading(result);
    out.push('\n');
    for line in summary_lines(result) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html(result: &AnalysisResult) -> String {
    let title = escape_html(&heading(result));
    let mut rows = String::new();
    for record in &result.records {
        let _ = writeln!(
            rows,
            "      <tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td></tr>",
            escape_html(&record.published_at),
            escape_html(&record.title),
            record.score,
            escape_html(&record.relevance_note)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
</head>
<body>
  <h1>{title}</h1>
  <p>Price ({symbol}): {price}</p>
  <table>
    <thead>
      <tr><th>Published</th><th>Title</th><th>Sentiment</th><th>Note</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
  <p>Average Sentiment: {average:.2} ({label})</p>
</body>
</html>
"#,
        symbol = escape_html(&result.price_symbol),
        price = format_price(result.price),
        average = result.average_sentiment,
        label = result.label,
    )
}

impl Emitter for ReportEmitter {
    fn name(&self) -> &'static str {
        "report"
    }

    fn emit(&self, result: &AnalysisResult) -> Result<()> {
        let key = result.target.artifact_key();

        let text_path = self.text_path(key);
        std::fs::write(&text_path, render_text(result))
            .with_context(|| format!("Failed to write {}", text_path.display()))?;

        let html_path = self.html_path(key);
        std::fs::write(&html_path, render_html(result))
            .with_context(|| format!("Failed to write {}", html_path.display()))?;

        info!(
            text = %text_path.display(),
            html = %html_path.display(),
            "Results saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample_result;
    use crate::target::TargetMode;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_render_text() {
        let result = sample_result(TargetMode::Stock("RELIANCE".into()), Some(2950.0));
        let text = render_text(&result);

        assert!(text.starts_with("Stock: RELIANCE Sentiment Analysis - 2024-07-01 09:15:00\n"));
        assert!(text.contains("Price (RELIANCE.NS): 2950.00\n"));
        assert!(text.ends_with("Average Sentiment: 0.17 (Bullish)\n"));
    }

    #[test]
    fn test_render_html_escapes_titles() {
        let result = sample_result(TargetMode::Stock("RELIANCE".into()), None);
        let html = render_html(&result);

        assert!(html.contains("RIL &amp; partners &lt;sign&gt; deal"));
        assert!(!html.contains("<sign>"));
        assert!(html.contains("Price (RELIANCE.NS): N/A"));
    }

    #[test]
    fn test_emit_overwrites_per_target_files() {
        let dir = temp_dir("market_sentiment_test_report");
        let emitter = ReportEmitter::new(&dir);

        let stock = sample_result(TargetMode::Stock("RELIANCE".into()), None);
        emitter.emit(&stock).unwrap();
        emitter.emit(&stock).unwrap();
        emitter
            .emit(&sample_result(TargetMode::Market, None))
            .unwrap();

        let mut names: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "sentiment_results_RELIANCE.html",
                "sentiment_results_RELIANCE.txt",
                "sentiment_results_market.html",
                "sentiment_results_market.txt",
            ]
        );

        let text = fs::read_to_string(emitter.text_path("RELIANCE")).unwrap();
        assert_eq!(text.matches("Average Sentiment").count(), 1);

        fs::remove_dir_all(&dir).unwrap();
    }
}
