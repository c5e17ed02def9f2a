//! SVG bar chart of per-item sentiment, one file per target.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

use super::Emitter;
use super::report::escape_html;
use crate::analyzers::types::AnalysisResult;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 170.0;

pub struct ChartEmitter {
    output_dir: PathBuf,
}

impl ChartEmitter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn chart_path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("sentiment_{key}.svg"))
    }
}

/// Bar colour for a score: green above zero, red below, grey at zero.
pub fn bar_color(score: f64) -> &'static str {
    if score > 0.0 {
        "green"
    } else if score < 0.0 {
        "red"
    } else {
        "grey"
    }
}

/// Renders one bar per record on a fixed [-1, 1] axis, labelled by publication time.
pub fn render_svg(result: &AnalysisResult) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let y_of = |v: f64| MARGIN_TOP + (1.0 - v) / 2.0 * plot_h;
    let zero_y = y_of(0.0);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif" font-size="12">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="25" text-anchor="middle" font-size="16">{} Sentiment Analysis</text>"#,
        WIDTH / 2.0,
        escape_html(&result.target.to_string())
    );

    for tick in [-1.0, -0.5, 0.0, 0.5, 1.0] {
        let y = y_of(tick);
        let _ = writeln!(
            svg,
            r##"  <line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#ddd"/>"##,
            WIDTH - MARGIN_RIGHT
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end">{tick:.1}</text>"#,
            MARGIN_LEFT - 8.0,
            y + 4.0
        );
    }
    let _ = writeln!(
        svg,
        r#"  <text transform="translate(18,{:.1}) rotate(-90)" text-anchor="middle">Sentiment Polarity (-1 to 1)</text>"#,
        MARGIN_TOP + plot_h / 2.0
    );

    let n = result.records.len().max(1) as f64;
    let slot = plot_w / n;
    let bar_w = (slot * 0.8).max(1.0);

    for (i, record) in result.records.iter().enumerate() {
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
        let y = y_of(record.score);
        let (top, height) = if y < zero_y {
            (y, zero_y - y)
        } else {
            (zero_y, y - zero_y)
        };
        let _ = writeln!(
            svg,
            r#"  <rect x="{x:.1}" y="{top:.1}" width="{bar_w:.1}" height="{height:.1}" fill="{}"><title>{} ({:.2})</title></rect>"#,
            bar_color(record.score),
            escape_html(&record.title),
            record.score
        );
        let label_x = x + bar_w / 2.0;
        let label_y = MARGIN_TOP + plot_h + 12.0;
        let _ = writeln!(
            svg,
            r#"  <text x="{label_x:.1}" y="{label_y:.1}" text-anchor="end" transform="rotate(-45 {label_x:.1} {label_y:.1})">{}</text>"#,
            escape_html(&record.published_at)
        );
    }

    let _ = writeln!(
        svg,
        r#"  <line x1="{MARGIN_LEFT}" y1="{zero_y:.1}" x2="{:.1}" y2="{zero_y:.1}" stroke="black"/>"#,
        WIDTH - MARGIN_RIGHT
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle">Publication Date</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 10.0
    );
    svg.push_str("</svg>\n");
    svg
}

impl Emitter for ChartEmitter {
    fn name(&self) -> &'static str {
        "chart"
    }

    fn emit(&self, result: &AnalysisResult) -> Result<()> {
        let path = self.chart_path(result.target.artifact_key());
        std::fs::write(&path, render_svg(result))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Chart saved");
        Ok(())
    }
}
