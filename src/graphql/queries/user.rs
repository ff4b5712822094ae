use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// Get the current authenticated user, straight from the token claims
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let principal = ctx.require_principal()?;
        Ok(principal_to_graphql(principal))
    }
}
