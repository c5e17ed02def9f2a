//! Contracts for the external collaborators the pipeline depends on.

pub mod news_feed;
pub mod price_api;
