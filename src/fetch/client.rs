use async_trait::async_trait;
use reqwest::{Request, Response};

/// Transport seam shared by the news feed and the price collaborators.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
