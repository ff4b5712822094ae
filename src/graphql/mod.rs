//! GraphQL API
//!
//! Read-side queries over videos, playlists and child profiles, two upstream
//! proxies (countries, YouTube search) and the declared identity mutations.
//! Served at `/graphql`.

pub mod auth;
pub mod mapper;
pub mod mutations;
pub mod queries;
mod schema;
pub mod types;

pub use auth::{AuthGuard, Principal, RequestContext, RequestContextBuilder, require_principal};
pub use schema::{KidsTubeSchema, MutationRoot, QueryRoot, SchemaServices, build_schema};
