//! HTTP-backed implementations of the collaborator traits in [`crate::services`].

pub mod rss;
pub mod yahoo;
