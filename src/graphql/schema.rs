//! GraphQL schema definition
//!
//! Queries are merged from per-domain objects. Authentication requirements
//! are enforced inside each resolver, so the schema itself is open.

use std::sync::Arc;

use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::DocumentStore;
use crate::services::{AuthService, CountriesClient, YouTubeClient};

use super::mutations::AuthMutations;
use super::queries::{
    ExternalQueries, PlaylistQueries, RestrictedUserQueries, UserQueries, VideoQueries,
};

/// The GraphQL schema type
pub type KidsTubeSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    VideoQueries,
    PlaylistQueries,
    RestrictedUserQueries,
    UserQueries,
    ExternalQueries,
);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutations);

/// Long-lived collaborators shared by every request
#[derive(Clone)]
pub struct SchemaServices {
    pub store: Arc<dyn DocumentStore>,
    pub countries: CountriesClient,
    pub youtube: YouTubeClient,
    pub auth: Arc<dyn AuthService>,
}

/// Build the GraphQL schema with all resolvers
pub fn build_schema(services: SchemaServices) -> KidsTubeSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(services.store)
        .data(services.countries)
        .data(services.youtube)
        .data(services.auth)
        .extension(Tracing)
        .finish()
}
