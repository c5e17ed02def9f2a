//! News data model: raw feed entries and the items the pipeline works on.

use chrono::{DateTime, TimeZone};

/// Format of the substitute timestamp for entries without a `published` field.
pub const PUBLISHED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One raw `<item>` as it came off the feed. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published: Option<String>,
}

/// A fetched news item. `relevance_note` is only set when the relevance
/// filter admitted it through the fallback tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub relevance_note: Option<String>,
}

impl NewsItem {
    /// Converts a raw entry, substituting `default_published` for a missing
    /// publication time and empty strings for a missing title or description.
    pub fn from_entry(entry: FeedEntry, default_published: &str) -> Self {
        Self {
            title: entry.title.unwrap_or_default(),
            description: entry.description.unwrap_or_default(),
            published_at: entry
                .published
                .unwrap_or_else(|| default_published.to_string()),
            relevance_note: None,
        }
    }

    /// Title and description joined by a single space; the text that gets scored.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.relevance_note = Some(note.to_string());
        self
    }
}

/// Renders the wall-clock default used for entries without a publication time.
pub fn default_published<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(PUBLISHED_FORMAT).to_string()
}
