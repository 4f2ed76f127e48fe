mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, anyhow};
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::debug;

/// GETs `url` as JSON and returns the raw body.
///
/// # Errors
///
/// Fails on an invalid URL, a transport error, or a non-2xx status (the
/// response body is included in the error).
#[tracing::instrument(skip(client))]
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let mut req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid URL {url:?}"))?,
    );
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("GET {url} failed"))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow!("GET {url} returned status {status}: {body}"));
    }

    let bytes = resp.bytes().await?.to_vec();
    debug!(bytes = bytes.len(), "Response received");
    Ok(bytes)
}
