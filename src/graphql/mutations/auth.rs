//! GraphQL identity mutations
//!
//! Declared here so the schema is complete for clients; the work itself is
//! delegated to the configured [AuthService]. None of these require an
//! authenticated caller.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, ID, InputObject, Object, Result};

use crate::graphql::mapper::auth_outcome_to_graphql;
use crate::graphql::types::AuthPayload;
use crate::services::AuthService;
use crate::services::auth::{GoogleProfileCompletion, Registration};

/// Input for parent registration
#[derive(InputObject)]
pub struct RegisterUserInput {
    pub email: String,
    pub password: String,
    pub phone: String,
    /// Six digit PIN used to unlock parent mode
    pub pin: String,
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    /// ISO date (YYYY-MM-DD)
    pub birth_date: String,
}

/// Input for finishing an account created through Google sign-in
#[derive(InputObject)]
pub struct CompleteGoogleProfileInput {
    pub user_id: ID,
    pub phone: String,
    pub pin: String,
    pub country: Option<String>,
    pub birth_date: String,
}

#[derive(Default)]
pub struct AuthMutations;

fn auth_service<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn AuthService>> {
    ctx.data::<Arc<dyn AuthService>>()
}

#[Object]
impl AuthMutations {
    /// Start a login; usually answers with `requiresVerification`
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthPayload> {
        let outcome = auth_service(ctx)?
            .login(&email, &password)
            .await
            .map_err(|e| e.extend())?;
        Ok(auth_outcome_to_graphql(outcome))
    }

    /// Confirm the SMS code sent during login
    async fn verify_sms_code(&self, ctx: &Context<'_>, user_id: ID, code: String) -> Result<AuthPayload> {
        let outcome = auth_service(ctx)?
            .verify_sms_code(&user_id, &code)
            .await
            .map_err(|e| e.extend())?;
        Ok(auth_outcome_to_graphql(outcome))
    }

    /// Sign in with a Google ID token
    async fn google_auth(&self, ctx: &Context<'_>, id_token: String) -> Result<AuthPayload> {
        let outcome = auth_service(ctx)?
            .google_auth(&id_token)
            .await
            .map_err(|e| e.extend())?;
        Ok(auth_outcome_to_graphql(outcome))
    }

    async fn complete_google_profile(
        &self,
        ctx: &Context<'_>,
        input: CompleteGoogleProfileInput,
    ) -> Result<AuthPayload> {
        let profile = GoogleProfileCompletion {
            user_id: input.user_id.0,
            phone: input.phone,
            pin: input.pin,
            country: input.country,
            birth_date: input.birth_date,
        };
        let outcome = auth_service(ctx)?
            .complete_google_profile(profile)
            .await
            .map_err(|e| e.extend())?;
        Ok(auth_outcome_to_graphql(outcome))
    }

    async fn register_user(&self, ctx: &Context<'_>, input: RegisterUserInput) -> Result<AuthPayload> {
        let registration = Registration {
            email: input.email,
            password: input.password,
            phone: input.phone,
            pin: input.pin,
            first_name: input.first_name,
            last_name: input.last_name,
            country: input.country,
            birth_date: input.birth_date,
        };
        let outcome = auth_service(ctx)?
            .register_user(registration)
            .await
            .map_err(|e| e.extend())?;
        Ok(auth_outcome_to_graphql(outcome))
    }
}
