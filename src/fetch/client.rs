use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes HTTP requests; lets callers swap the transport (stubs in tests).
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
