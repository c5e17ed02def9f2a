//! Sentiment aggregation and labeling.
//!
//! This module reduces the per-item scores of one pass to a signed average,
//! maps the average onto a directional label, and pairs the result with a
//! price observation.

pub mod aggregate;
pub mod correlate;
pub mod label;
pub mod types;
pub mod utility;
