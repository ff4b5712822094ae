use super::prelude::*;

#[derive(Default)]
pub struct RestrictedUserQueries;

#[Object]
impl RestrictedUserQueries {
    /// List the profiles of a parent.
    ///
    /// Uses `parentUserId` when given, otherwise the caller's own id. Fails
    /// only when neither is available.
    async fn restricted_users(
        &self,
        ctx: &Context<'_>,
        parent_user_id: Option<ID>,
    ) -> Result<Vec<RestrictedUser>> {
        let parent = match non_blank(parent_user_id.as_deref()) {
            Some(id) => id,
            None => match ctx.principal() {
                Some(principal) => {
                    debug!(user_id = %principal.id, "Using user ID from context");
                    principal.id.clone()
                }
                None => return Err(ApiError::ParentUserRequired.extend()),
            },
        };
        let store = store(ctx)?;

        let Some(parent_id) = parse_object_id(&parent) else {
            debug!(parent_user_id = %parent, "Parent user id is not a valid id");
            return Ok(Vec::new());
        };

        let profiles = store
            .find_restricted_users(parent_id)
            .await
            .map_err(|e| ApiError::store("restricted users", e))
            .or_empty("restrictedUsers");

        debug!(count = profiles.len(), "Found restricted users");
        Ok(profiles
            .into_iter()
            .map(restricted_user_document_to_graphql)
            .collect())
    }

    /// Get a restricted user profile by ID
    async fn restricted_user(&self, ctx: &Context<'_>, id: ID) -> Result<RestrictedUser> {
        let principal = ctx.require_principal()?;
        let store = store(ctx)?;
        info!(profile_id = %id.as_str(), user_id = %principal.id, "Fetching restricted user");

        let Some(profile_id) = parse_object_id(&id) else {
            return Err(ApiError::not_found("User").extend());
        };

        let profile = store
            .find_restricted_user(profile_id)
            .await
            .map_err(|e| ApiError::store("restricted user", e).extend())?
            .ok_or_else(|| ApiError::not_found("User").extend())?;

        Ok(restricted_user_document_to_graphql(profile))
    }
}
