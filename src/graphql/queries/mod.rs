pub mod external;
pub mod playlists;
pub mod restricted_users;
pub mod user;
pub mod videos;

pub use external::ExternalQueries;
pub use playlists::PlaylistQueries;
pub use restricted_users::RestrictedUserQueries;
pub use user::UserQueries;
pub use videos::VideoQueries;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, ErrorExtensions, ID, Object, Result};
    pub(crate) use tracing::{debug, info};

    pub(crate) use crate::db::{DocumentStore, parse_object_id};
    pub(crate) use crate::error::{ApiError, FailOpen};
    pub(crate) use crate::graphql::auth::{AuthExt, AuthGuard};
    pub(crate) use crate::graphql::mapper::*;
    pub(crate) use crate::graphql::types::*;

    /// Treat a missing or blank optional argument the same way
    pub(crate) fn non_blank<S: AsRef<str>>(value: Option<S>) -> Option<String> {
        value
            .map(|v| v.as_ref().trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub(crate) fn store<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn DocumentStore>> {
        ctx.data::<Arc<dyn DocumentStore>>()
    }
}
