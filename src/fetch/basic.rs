use super::client::HttpClient;
use async_trait::async_trait;
use std::time::Duration;

/// Browser-like agent; some quote endpoints reject the default reqwest one.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) market_sentiment/0.1";

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
