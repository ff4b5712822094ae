//! YouTube Data API search adapter
//!
//! Wraps `search.list` for video results and normalizes both the result
//! items and the error payloads into this service's types.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::error::ApiError;

use super::upstream::HttpFetch;

const SERVICE: &str = "YouTube API";

/// Maximum number of results requested per search
pub const MAX_RESULTS: u32 = 9;

/// Normalized search hit. Missing upstream fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YouTubeVideo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    pub published_at: String,
}

/// Error envelope returned by Google APIs
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

#[derive(Clone)]
pub struct YouTubeClient {
    http: Arc<dyn HttpFetch>,
    api_url: Url,
    api_key: Option<String>,
}

impl YouTubeClient {
    pub fn new(http: Arc<dyn HttpFetch>, api_url: Url, api_key: Option<String>) -> Self {
        Self { http, api_url, api_key }
    }

    /// Search for videos matching `query`.
    ///
    /// Input and configuration are checked before any request is made.
    pub async fn search(&self, query: &str) -> Result<Vec<YouTubeVideo>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::Validation("Search query is required".to_string()));
        }

        let Some(api_key) = self.api_key.as_deref() else {
            error!("YouTube API key is not configured");
            return Err(ApiError::Configuration(
                "YouTube API configuration error".to_string(),
            ));
        };

        info!(query = %query, "Searching YouTube");

        let max_results = MAX_RESULTS.to_string();
        let params = [
            ("part", "snippet"),
            ("maxResults", max_results.as_str()),
            ("q", query),
            ("type", "video"),
            ("key", api_key),
        ];

        let response = self
            .http
            .get(&self.api_url, &params)
            .await
            .map_err(|source| ApiError::UpstreamTransport { service: SERVICE, source })?;

        if !response.is_success() {
            return Err(map_error_response(response.status, &response.body));
        }

        let body: Value = serde_json::from_str(&response.body).map_err(|e| {
            error!(error = %e, "YouTube response was not JSON");
            ApiError::InvalidUpstreamResponse { service: SERVICE }
        })?;

        let Some(items) = body.get("items").and_then(Value::as_array) else {
            error!("YouTube response has no items array");
            return Err(ApiError::InvalidUpstreamResponse { service: SERVICE });
        };

        debug!(count = items.len(), "YouTube search returned results");
        Ok(items.iter().map(video_from_item).collect())
    }
}

/// Map a non-2xx response onto an error kind.
///
/// The `error.code` in a parseable body decides quota versus bad request;
/// an unparseable body only keeps the HTTP status.
fn map_error_response(status: u16, body: &str) -> ApiError {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        error!(status, "Non-JSON YouTube API error response");
        return ApiError::UpstreamStatus { service: SERVICE, status, message: None };
    };

    let (code, message) = match envelope.error {
        Some(ErrorBody { code, message }) => (code, message),
        None => (None, None),
    };
    error!(status, code = ?code, message = ?message, "YouTube API returned an error");

    match code {
        Some(403) => ApiError::QuotaExceeded,
        Some(400) => ApiError::BadRequest(
            message.unwrap_or_else(|| "Invalid request parameters".to_string()),
        ),
        _ => ApiError::UpstreamStatus { service: SERVICE, status, message },
    }
}

fn text_at(item: &Value, pointer: &str) -> String {
    item.pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn video_from_item(item: &Value) -> YouTubeVideo {
    YouTubeVideo {
        id: text_at(item, "/id/videoId"),
        title: text_at(item, "/snippet/title"),
        description: text_at(item, "/snippet/description"),
        thumbnail_url: text_at(item, "/snippet/thumbnails/medium/url"),
        channel_title: text_at(item, "/snippet/channelTitle"),
        published_at: text_at(item, "/snippet/publishedAt"),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::services::testing::StubFetch;

    const API_URL: &str = "https://www.googleapis.com/youtube/v3/search";

    fn client(stub: &Arc<StubFetch>, key: Option<&str>) -> YouTubeClient {
        YouTubeClient::new(
            stub.clone(),
            Url::parse(API_URL).unwrap(),
            key.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn test_blank_query_rejected_before_request() {
        let stub = Arc::new(StubFetch::new(200, r#"{"items":[]}"#));
        for query in ["", "   ", "\t\n"] {
            let err = client(&stub, Some("key")).search(query).await.unwrap_err();
            assert_matches!(err, ApiError::Validation(_));
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_rejected_before_request() {
        let stub = Arc::new(StubFetch::new(200, r#"{"items":[]}"#));
        let err = client(&stub, None).search("cats").await.unwrap_err();
        assert_matches!(err, ApiError::Configuration(_));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let stub = Arc::new(StubFetch::new(200, r#"{"items":[]}"#));
        client(&stub, Some("secret-key")).search("  lego cars ").await.unwrap();

        assert_eq!(stub.calls(), 1);
        assert_eq!(stub.query_value("q").as_deref(), Some("lego cars"));
        assert_eq!(stub.query_value("type").as_deref(), Some("video"));
        assert_eq!(stub.query_value("maxResults").as_deref(), Some("9"));
        assert_eq!(stub.query_value("part").as_deref(), Some("snippet"));
        assert_eq!(stub.query_value("key").as_deref(), Some("secret-key"));
    }

    #[tokio::test]
    async fn test_items_mapped_with_defaults() {
        let body = r#"{
            "items": [
                {
                    "id": {"kind": "youtube#video", "videoId": "abc123"},
                    "snippet": {
                        "title": "Counting songs",
                        "description": "Learn to count",
                        "thumbnails": {"medium": {"url": "https://i.ytimg.com/vi/abc123/mqdefault.jpg"}},
                        "channelTitle": "Kids Channel",
                        "publishedAt": "2024-01-02T03:04:05Z"
                    }
                },
                {"id": {"kind": "youtube#video"}}
            ]
        }"#;
        let stub = Arc::new(StubFetch::new(200, body));
        let videos = client(&stub, Some("key")).search("count").await.unwrap();

        assert_eq!(
            videos[0],
            YouTubeVideo {
                id: "abc123".into(),
                title: "Counting songs".into(),
                description: "Learn to count".into(),
                thumbnail_url: "https://i.ytimg.com/vi/abc123/mqdefault.jpg".into(),
                channel_title: "Kids Channel".into(),
                published_at: "2024-01-02T03:04:05Z".into(),
            }
        );
        assert_eq!(videos[1], YouTubeVideo::default());
    }

    #[tokio::test]
    async fn test_missing_items_is_invalid_format() {
        let stub = Arc::new(StubFetch::new(200, r#"{"kind":"youtube#searchListResponse"}"#));
        let err = client(&stub, Some("key")).search("cats").await.unwrap_err();
        assert_matches!(err, ApiError::InvalidUpstreamResponse { .. });

        let stub = Arc::new(StubFetch::new(200, r#"{"items":{}}"#));
        let err = client(&stub, Some("key")).search("cats").await.unwrap_err();
        assert_matches!(err, ApiError::InvalidUpstreamResponse { .. });
    }

    #[test]
    fn test_quota_and_bad_request_are_distinct() {
        let quota = map_error_response(
            403,
            r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota."}}"#,
        );
        assert_matches!(quota, ApiError::QuotaExceeded);

        let bad = map_error_response(400, r#"{"error":{"code":400,"message":"API key not valid."}}"#);
        assert_matches!(bad, ApiError::BadRequest(ref m) if m == "API key not valid.");
        assert_ne!(quota.code(), bad.code());
    }

    #[test]
    fn test_other_error_codes_keep_status() {
        let err = map_error_response(500, r#"{"error":{"code":500,"message":"Backend Error"}}"#);
        assert_matches!(
            err,
            ApiError::UpstreamStatus { status: 500, message: Some(ref m), .. } if m == "Backend Error"
        );
    }

    #[test]
    fn test_unparseable_error_body_keeps_only_status() {
        let err = map_error_response(502, "<html>Bad Gateway</html>");
        assert_matches!(err, ApiError::UpstreamStatus { status: 502, message: None, .. });
    }

    #[tokio::test]
    async fn test_error_response_flows_through_search() {
        let stub = Arc::new(StubFetch::new(403, r#"{"error":{"code":403}}"#));
        let err = client(&stub, Some("key")).search("cats").await.unwrap_err();
        assert_matches!(err, ApiError::QuotaExceeded);
    }
}
