pub mod analyzers;
pub mod config;
pub mod fetch;
pub mod filter;
pub mod infra;
pub mod logging;
pub mod news;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod scheduler;
pub mod sentiment;
pub mod services;
pub mod target;
