//! Trait for the price collaborator and its failure-absorbing wrapper.

use anyhow::Result;
use tracing::{debug, warn};

use crate::target::TargetMode;

/// A point-in-time price for the instrument behind a [`TargetMode`].
#[derive(Debug, Clone, PartialEq)]
pub struct PriceObservation {
    pub price: Option<f64>,
    pub symbol: String,
}

/// Source of the latest price for an instrument.
#[async_trait::async_trait]
pub trait PriceApi: Send + Sync {
    /// Instrument name queried for `target`.
    fn instrument(&self, target: &TargetMode) -> String;

    /// Latest close for `instrument`, or `None` when the series is empty.
    async fn latest_close(&self, instrument: &str) -> Result<Option<f64>>;
}

/// Looks up the price for `target`. Never fails: errors and empty series
/// both produce an observation with `price: None`.
pub async fn fetch_price(api: &dyn PriceApi, target: &TargetMode) -> PriceObservation {
    let symbol = api.instrument(target);
    let price = match api.latest_close(&symbol).await {
        Ok(Some(price)) => Some(price),
        Ok(None) => {
            debug!(symbol = %symbol, "No price data returned");
            None
        }
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "Price fetch failed");
            None
        }
    };
    PriceObservation { price, symbol }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct StaticPrices(Result<Option<f64>, &'static str>);

    #[async_trait::async_trait]
    impl PriceApi for StaticPrices {
        fn instrument(&self, target: &TargetMode) -> String {
            target.instrument(".NS", "^NSEI")
        }

        async fn latest_close(&self, _instrument: &str) -> Result<Option<f64>> {
            self.0.map_err(|e| anyhow!(e))
        }
    }

    #[tokio::test]
    async fn test_error_becomes_absent_price() {
        let target = TargetMode::Stock("RELIANCE".into());
        let obs = fetch_price(&StaticPrices(Err("timeout")), &target).await;
        assert_eq!(obs.price, None);
        assert_eq!(obs.symbol, "RELIANCE.NS");
    }

    #[tokio::test]
    async fn test_present_price_is_kept() {
        let obs = fetch_price(&StaticPrices(Ok(Some(24_010.5))), &TargetMode::Market).await;
        assert_eq!(obs.price, Some(24_010.5));
        assert_eq!(obs.symbol, "^NSEI");
    }
}
