//! One pipeline pass: fetch → filter → score → aggregate → correlate → emit.

use chrono::Local;
use std::sync::Arc;
use tracing::{Instrument, info, warn};

use crate::analyzers::aggregate::aggregate_sentiment;
use crate::analyzers::correlate::correlate;
use crate::analyzers::types::AnalysisResult;
use crate::filter::{MatchTier, filter_relevant};
use crate::output::{Emitter, emit_all};
use crate::scheduler::RefreshJob;
use crate::sentiment::{SentimentScorer, score_items};
use crate::services::news_feed::{NewsFeed, fetch_news};
use crate::services::price_api::{PriceApi, fetch_price};
use crate::target::TargetMode;

/// Collaborators shared by every pass of a process. Built once at start-up.
#[derive(Clone)]
pub struct Services {
    pub feed: Arc<dyn NewsFeed>,
    pub prices: Arc<dyn PriceApi>,
    pub scorer: Arc<dyn SentimentScorer>,
    pub emitters: Vec<Arc<dyn Emitter>>,
}

/// What a single pass produced.
#[derive(Debug)]
pub enum PassOutcome {
    Analyzed(AnalysisResult),
    /// The relevance filter admitted nothing; no result was built.
    NoRelevantNews,
}

/// The pipeline for one fixed target.
pub struct Pipeline {
    target: TargetMode,
    services: Services,
}

impl Pipeline {
    pub fn new(target: TargetMode, services: Services) -> Self {
        Self { target, services }
    }

    pub fn target(&self) -> &TargetMode {
        &self.target
    }

    /// Runs every stage except emission. Holds no state between calls.
    pub async fn analyze(&self) -> PassOutcome {
        let timestamp = Local::now();

        let items = fetch_news(self.services.feed.as_ref(), timestamp).await;
        let outcome = filter_relevant(&items, &self.target);
        info!(
            fetched = items.len(),
            admitted = outcome.admitted.len(),
            tier = ?outcome.tier,
            "Relevance filter applied"
        );

        if outcome.tier == MatchTier::Fallback {
            info!("No {}-specific news found, fell back to market news", self.target);
        }
        if outcome.admitted.is_empty() {
            return PassOutcome::NoRelevantNews;
        }

        let records = score_items(self.services.scorer.as_ref(), &outcome.admitted);
        let Some(summary) = aggregate_sentiment(&records) else {
            return PassOutcome::NoRelevantNews;
        };

        let price = fetch_price(self.services.prices.as_ref(), &self.target).await;

        PassOutcome::Analyzed(correlate(
            self.target.clone(),
            timestamp,
            records,
            summary,
            price,
        ))
    }

    /// Runs one full pass and hands the result to every emitter.
    pub async fn run_once(&self) -> PassOutcome {
        let span = tracing::info_span!("pass", target = %self.target);
        async {
            let outcome = self.analyze().await;
            match &outcome {
                PassOutcome::Analyzed(result) => {
                    info!(
                        items = result.records.len(),
                        average = result.average_sentiment,
                        label = %result.label,
                        price_symbol = %result.price_symbol,
                        price = ?result.price,
                        "Pass complete"
                    );
                    emit_all(&self.services.emitters, result);
                }
                PassOutcome::NoRelevantNews => {
                    warn!("No news found for {}", self.target);
                }
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

#[async_trait::async_trait]
impl RefreshJob for Pipeline {
    async fn run_pass(&mut self) {
        self.run_once().await;
    }
}
