use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::fetch::{HttpClient, fetch_bytes};
use crate::services::price_api::PriceApi;
use crate::target::TargetMode;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Decodes a chart API body into its last non-null close.
///
/// An empty result set or a series with only null closes is `Ok(None)`;
/// an API-level error object is an `Err`.
pub fn parse_latest_close(body: &[u8]) -> Result<Option<f64>> {
    let response: ChartResponse =
        serde_json::from_slice(body).context("Failed to parse chart response")?;

    if let Some(error) = response.chart.error {
        bail!("Chart API error: {} - {}", error.code, error.description);
    }

    let close = response
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|data| data.indicators.quote.into_iter().next())
        .and_then(|quote| quote.close.into_iter().rev().flatten().next());

    Ok(close)
}

/// Price collaborator backed by the Yahoo Finance chart endpoint.
pub struct YahooPriceClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    exchange_suffix: String,
    market_index: String,
}

impl YahooPriceClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        exchange_suffix: impl Into<String>,
        market_index: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            exchange_suffix: exchange_suffix.into(),
            market_index: market_index.into(),
        }
    }

    fn chart_url(&self, instrument: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?interval=1d&range=1d",
            self.base_url.trim_end_matches('/'),
            instrument
        )
    }
}

#[async_trait]
impl PriceApi for YahooPriceClient {
    fn instrument(&self, target: &TargetMode) -> String {
        target.instrument(&self.exchange_suffix, &self.market_index)
    }

    #[tracing::instrument(skip(self))]
    async fn latest_close(&self, instrument: &str) -> Result<Option<f64>> {
        let body = fetch_bytes(self.http.as_ref(), &self.chart_url(instrument))
            .await
            .context("Chart request failed")?;
        parse_latest_close(&body)
    }
}
