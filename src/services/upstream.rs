//! Outbound HTTP seam shared by the upstream adapters

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Raw upstream reply. Status handling is left to each adapter.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests to upstream services.
///
/// No timeout or retry is applied: each call completes or fails once.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &Url, query: &[(&str, &str)]) -> Result<UpstreamResponse>;
}

/// [HttpFetch] over a shared reqwest client
#[derive(Clone, Default)]
pub struct ReqwestFetch {
    client: Client,
}

impl ReqwestFetch {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get(&self, url: &Url, query: &[(&str, &str)]) -> Result<UpstreamResponse> {
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url.path()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(UpstreamResponse { status, body })
    }
}
