//! Trait for the news feed collaborator and its failure-absorbing wrapper.

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::error;

use crate::news::{FeedEntry, NewsItem, default_published};

/// A fixed source of news entries.
#[async_trait::async_trait]
pub trait NewsFeed: Send + Sync {
    /// Returns the feed's entries in feed order.
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>>;
}

/// Fetches the feed and converts its entries into [`NewsItem`]s.
///
/// Never fails: a fetch or parse error is logged and yields an empty list.
/// Entries without a publication time get `now` rendered as
/// `YYYY-MM-DD HH:MM:SS`.
pub async fn fetch_news(feed: &dyn NewsFeed, now: DateTime<Local>) -> Vec<NewsItem> {
    match feed.fetch_entries().await {
        Ok(entries) => {
            let fallback = default_published(&now);
            entries
                .into_iter()
                .map(|entry| NewsItem::from_entry(entry, &fallback))
                .collect()
        }
        Err(e) => {
            error!(error = %e, "News feed fetch failed");
            Vec::new()
        }
    }
}
