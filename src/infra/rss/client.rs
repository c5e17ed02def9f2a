use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::fetch::{HttpClient, fetch_bytes};
use crate::news::FeedEntry;
use crate::parser::parse_feed;
use crate::services::news_feed::NewsFeed;

/// News feed backed by a single RSS URL.
pub struct RssNewsFeed {
    http: Arc<dyn HttpClient>,
    url: String,
}

impl RssNewsFeed {
    pub fn new(http: Arc<dyn HttpClient>, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl NewsFeed for RssNewsFeed {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>> {
        let bytes = fetch_bytes(self.http.as_ref(), &self.url)
            .await
            .context("RSS request failed")?;
        debug!(bytes = bytes.len(), "Feed bytes received, parsing");

        let entries = parse_feed(&bytes)?;
        debug!(entries = entries.len(), "Feed parsed");
        Ok(entries)
    }
}
