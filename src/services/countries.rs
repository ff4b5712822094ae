//! Countries adapter
//!
//! Proxies `GET {BACKEND_URL}/api/countries` from the sibling REST backend.
//! The payload is passed through as-is.

use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::error::ApiError;

use super::upstream::HttpFetch;

const SERVICE: &str = "Countries API";
const COUNTRIES_PATH: &str = "/api/countries";

#[derive(Clone)]
pub struct CountriesClient {
    http: Arc<dyn HttpFetch>,
    base_url: Url,
}

impl CountriesClient {
    pub fn new(http: Arc<dyn HttpFetch>, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{COUNTRIES_PATH}"))
            .context("Invalid countries URL")
            .map_err(|source| ApiError::UpstreamTransport { service: SERVICE, source })
    }

    /// Fetch the country list. Each entry is the upstream JSON object, unmodified.
    pub async fn list(&self) -> Result<Vec<Value>, ApiError> {
        let url = self.endpoint()?;
        debug!(url = %url, "Fetching countries");

        let response = self
            .http
            .get(&url, &[])
            .await
            .map_err(|source| ApiError::UpstreamTransport { service: SERVICE, source })?;

        if !response.is_success() {
            error!(status = response.status, "Countries request failed");
            return Err(ApiError::UpstreamStatus {
                service: SERVICE,
                status: response.status,
                message: None,
            });
        }

        match serde_json::from_str::<Value>(&response.body) {
            Ok(Value::Array(countries)) => {
                debug!(count = countries.len(), "Countries fetched");
                Ok(countries)
            }
            Ok(_) | Err(_) => {
                error!("Countries response was not a JSON array");
                Err(ApiError::InvalidUpstreamResponse { service: SERVICE })
            }
        }
    }
}
