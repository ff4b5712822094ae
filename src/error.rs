//! Domain error kinds surfaced to GraphQL clients
//!
//! Every variant maps to a stable `extensions.code` so the kind of failure
//! survives the trip through the GraphQL transport.

use std::fmt::Display;

use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required. Please log in.")]
    AuthenticationRequired,

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Parent user ID is required")]
    ParentUserRequired,

    #[error("YouTube API key unauthorized or quota exceeded")]
    QuotaExceeded,

    #[error("YouTube API request error: {0}")]
    BadRequest(String),

    #[error("{service} error ({status}){}", detail_suffix(.message))]
    UpstreamStatus {
        service: &'static str,
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid {service} response format")]
    InvalidUpstreamResponse { service: &'static str },

    #[error("{service} request failed: {source}")]
    UpstreamTransport {
        service: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to fetch {entity}: {source}")]
    Store {
        entity: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("{0}")]
    Unavailable(String),
}

fn detail_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl ApiError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn store(entity: &'static str, source: anyhow::Error) -> Self {
        Self::Store { entity, source }
    }

    /// Machine readable code placed in `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "UNAUTHENTICATED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::ParentUserRequired => "PARENT_USER_REQUIRED",
            Self::QuotaExceeded => "UPSTREAM_UNAUTHORIZED",
            Self::BadRequest(_) => "UPSTREAM_BAD_REQUEST",
            Self::UpstreamStatus { .. }
            | Self::InvalidUpstreamResponse { .. }
            | Self::UpstreamTransport { .. } => "UPSTREAM_ERROR",
            Self::Store { .. } => "STORE_ERROR",
            Self::Unavailable(_) => "AUTH_SERVICE_UNAVAILABLE",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            if let Self::UpstreamStatus { status, .. } = self {
                e.set("status", i32::from(*status));
            }
        })
    }
}

/// Fail-open policy for list reads: a failed lookup becomes an empty list.
///
/// The failure is still logged so it stays visible in diagnostics.
pub trait FailOpen<T> {
    fn or_empty(self, operation: &str) -> Vec<T>;
}

impl<T, E: Display> FailOpen<T> for Result<Vec<T>, E> {
    fn or_empty(self, operation: &str) -> Vec<T> {
        match self {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(operation = %operation, error = %e, "Lookup failed, returning empty list");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_distinguish_youtube_failures() {
        assert_ne!(ApiError::QuotaExceeded.code(), ApiError::BadRequest("x".into()).code());
        assert_eq!(
            ApiError::UpstreamStatus { service: "YouTube API", status: 500, message: None }.code(),
            "UPSTREAM_ERROR"
        );
    }

    #[test]
    fn test_upstream_status_message() {
        let err = ApiError::UpstreamStatus {
            service: "YouTube API",
            status: 503,
            message: Some("Backend Error".into()),
        };
        assert_eq!(err.to_string(), "YouTube API error (503): Backend Error");

        let err = ApiError::UpstreamStatus { service: "Countries API", status: 404, message: None };
        assert_eq!(err.to_string(), "Countries API error (404)");
    }

    #[test]
    fn test_extend_sets_code_and_status() {
        let err = ApiError::UpstreamStatus { service: "Countries API", status: 502, message: None }.extend();
        let ext = err.extensions.expect("extensions");
        assert_eq!(ext.get("code"), Some(&async_graphql::Value::from("UPSTREAM_ERROR")));
        assert_eq!(ext.get("status"), Some(&async_graphql::Value::from(502)));
    }

    #[test]
    fn test_store_error_keeps_cause() {
        let err = ApiError::store("video", anyhow::anyhow!("connection reset"));
        assert_eq!(err.to_string(), "Failed to fetch video: connection reset");
        assert_eq!(err.code(), "STORE_ERROR");
    }

    #[test]
    fn test_or_empty() {
        let ok: Result<Vec<i32>, ApiError> = Ok(vec![1, 2]);
        assert_eq!(ok.or_empty("numbers"), vec![1, 2]);

        let failed: Result<Vec<i32>, ApiError> = Err(ApiError::not_found("number"));
        assert!(failed.or_empty("numbers").is_empty());
    }
}
