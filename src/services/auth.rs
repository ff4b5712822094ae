//! Identity lifecycle seam
//!
//! Login, SMS verification, Google sign-in and registration belong to the
//! sibling Auth Service. The GraphQL mutations delegate here so that a real
//! implementation can be plugged in; this gateway ships without one.

use async_trait::async_trait;

use crate::error::ApiError;

/// User fields returned alongside an auth result
#[derive(Debug, Clone, Default)]
pub struct AuthUserInfo {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub status: Option<String>,
}

/// Outcome of any identity operation
#[derive(Debug, Clone, Default)]
pub struct AuthOutcome {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub requires_verification: Option<bool>,
    pub is_new_user: Option<bool>,
    pub message: String,
    pub user: Option<AuthUserInfo>,
}

/// Registration details. Carries credentials, so no `Debug`.
#[derive(Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub phone: String,
    pub pin: String,
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub birth_date: String,
}

#[derive(Clone)]
pub struct GoogleProfileCompletion {
    pub user_id: String,
    pub phone: String,
    pub pin: String,
    pub country: Option<String>,
    pub birth_date: String,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, ApiError>;

    async fn verify_sms_code(&self, user_id: &str, code: &str) -> Result<AuthOutcome, ApiError>;

    async fn google_auth(&self, id_token: &str) -> Result<AuthOutcome, ApiError>;

    async fn complete_google_profile(
        &self,
        profile: GoogleProfileCompletion,
    ) -> Result<AuthOutcome, ApiError>;

    async fn register_user(&self, registration: Registration) -> Result<AuthOutcome, ApiError>;
}

/// Used when no Auth Service is wired in. Every operation is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableAuthService;

impl UnavailableAuthService {
    fn refuse(operation: &str) -> ApiError {
        tracing::warn!(operation = %operation, "Identity operation requested but no auth service is configured");
        ApiError::Unavailable(format!(
            "{operation} is handled by the Auth Service, which is not available on this gateway"
        ))
    }
}

#[async_trait]
impl AuthService for UnavailableAuthService {
    async fn login(&self, _email: &str, _password: &str) -> Result<AuthOutcome, ApiError> {
        Err(Self::refuse("login"))
    }

    async fn verify_sms_code(&self, _user_id: &str, _code: &str) -> Result<AuthOutcome, ApiError> {
        Err(Self::refuse("verifySmsCode"))
    }

    async fn google_auth(&self, _id_token: &str) -> Result<AuthOutcome, ApiError> {
        Err(Self::refuse("googleAuth"))
    }

    async fn complete_google_profile(
        &self,
        _profile: GoogleProfileCompletion,
    ) -> Result<AuthOutcome, ApiError> {
        Err(Self::refuse("completeGoogleProfile"))
    }

    async fn register_user(&self, _registration: Registration) -> Result<AuthOutcome, ApiError> {
        Err(Self::refuse("registerUser"))
    }
}
