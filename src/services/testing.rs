//! Canned [HttpFetch] for adapter tests

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use url::Url;

use super::upstream::{HttpFetch, UpstreamResponse};

pub(crate) struct StubFetch {
    status: u16,
    body: String,
    calls: AtomicUsize,
    last_url: Mutex<Option<Url>>,
    last_query: Mutex<Vec<(String, String)>>,
}

impl StubFetch {
    pub(crate) fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            calls: AtomicUsize::new(0),
            last_url: Mutex::new(None),
            last_query: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_url(&self) -> Option<String> {
        self.last_url.lock().as_ref().map(|u| u.to_string())
    }

    pub(crate) fn query_value(&self, key: &str) -> Option<String> {
        self.last_query
            .lock()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

#[async_trait]
impl HttpFetch for StubFetch {
    async fn get(&self, url: &Url, query: &[(&str, &str)]) -> Result<UpstreamResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock() = Some(url.clone());
        *self.last_query.lock() = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Ok(UpstreamResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
