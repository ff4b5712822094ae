//! GraphQL authentication and authorization
//!
//! [RequestContextBuilder] turns the `Authorization` header into a
//! [RequestContext]. Verification failures never fail the request; they only
//! leave the context without a [Principal]. Enforcement happens at the point
//! of use through [require_principal] / [AuthExt::require_principal].
//!
//! ## Guards
//!
//! Use `AuthGuard` to require authentication on any GraphQL operation:
//!
//! ```ignore
//! #[graphql(guard = "AuthGuard")]
//! async fn protected_query(&self, ctx: &Context<'_>) -> Result<String> { ... }
//! ```

use async_graphql::{Context, ErrorExtensions, Result};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity decoded from a verified bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Per-request authentication state
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub principal: Option<Principal>,
    /// Raw bearer token as presented, whether or not it verified
    pub token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(principal: Principal, token: impl Into<String>) -> Self {
        Self {
            principal: Some(principal),
            token: Some(token.into()),
        }
    }
}

/// Builds a [RequestContext] from the transport-level `Authorization` header
#[derive(Clone)]
pub struct RequestContextBuilder {
    key: DecodingKey,
    validation: Validation,
}

impl RequestContextBuilder {
    /// Verify tokens signed with `secret` (HS256, expiry enforced)
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is enforced when present, with no clock tolerance
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.trim().as_bytes()),
            validation,
        }
    }

    /// Build the context for one request. Never fails.
    pub fn build(&self, authorization: Option<&str>) -> RequestContext {
        let Some(token) = authorization
            .and_then(|h| h.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            return RequestContext::anonymous();
        };

        let principal = match self.verify(token) {
            Ok(principal) => {
                debug!(user_id = %principal.id, "Bearer token verified");
                Some(principal)
            }
            Err(e) => {
                warn!(error = %e, "JWT verification failed");
                None
            }
        };

        RequestContext {
            principal,
            token: Some(token.to_string()),
        }
    }

    /// Verify a token and decode its claims
    pub fn verify(&self, token: &str) -> Result<Principal, jsonwebtoken::errors::Error> {
        decode::<Principal>(token, &self.key, &self.validation).map(|data| data.claims)
    }
}

/// Return the principal or fail with [ApiError::AuthenticationRequired].
///
/// Presence of a verified principal is all that is checked.
pub fn require_principal(context: &RequestContext) -> Result<&Principal, ApiError> {
    context
        .principal
        .as_ref()
        .ok_or(ApiError::AuthenticationRequired)
}

/// Extension trait to get the request's authentication state from GraphQL context
pub trait AuthExt {
    /// The principal, if the request carried a valid token
    fn principal(&self) -> Option<&Principal>;

    /// Get the principal, or return an error if not authenticated
    fn require_principal(&self) -> Result<&Principal>;
}

impl<'a> AuthExt for Context<'a> {
    fn principal(&self) -> Option<&Principal> {
        self.data_opt::<RequestContext>()
            .and_then(|c| c.principal.as_ref())
    }

    fn require_principal(&self) -> Result<&Principal> {
        match self.data_opt::<RequestContext>() {
            Some(context) => require_principal(context).map_err(|e| e.extend()),
            None => Err(ApiError::AuthenticationRequired.extend()),
        }
    }
}

/// Guard that requires authentication for GraphQL operations.
///
/// Use with `#[graphql(guard = "AuthGuard")]` on queries, mutations, or fields.
pub struct AuthGuard;

impl async_graphql::Guard for AuthGuard {
    fn check(&self, ctx: &Context<'_>) -> impl std::future::Future<Output = Result<()>> + Send {
        let result = ctx.require_principal().map(|_| ());
        async move { result }
    }
}
