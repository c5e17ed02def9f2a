pub mod client;

pub use client::YahooPriceClient;
