pub mod client;

pub use client::RssNewsFeed;
