//! External service integrations

pub mod auth;
pub mod countries;
pub mod upstream;
pub mod youtube;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthOutcome, AuthService, AuthUserInfo, UnavailableAuthService};
pub use countries::CountriesClient;
pub use upstream::{HttpFetch, ReqwestFetch, UpstreamResponse};
pub use youtube::{YouTubeClient, YouTubeVideo};
