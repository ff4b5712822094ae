use super::prelude::*;

use crate::db::VideoFilter;

#[derive(Default)]
pub struct VideoQueries;

#[Object]
impl VideoQueries {
    /// List videos, optionally by owner and/or a text search.
    ///
    /// Public unless `userId` is given. Lookup failures yield an empty list.
    async fn videos(
        &self,
        ctx: &Context<'_>,
        user_id: Option<ID>,
        search: Option<String>,
    ) -> Result<Vec<Video>> {
        let user_id = non_blank(user_id.as_deref());
        if user_id.is_some() {
            ctx.require_principal()?;
        }
        let search = non_blank(search.as_deref());
        let store = store(ctx)?;

        let user_id = match user_id {
            Some(raw) => match parse_object_id(&raw) {
                Some(id) => Some(id),
                None => {
                    debug!(user_id = %raw, "userId is not a valid id, no video can match");
                    return Ok(Vec::new());
                }
            },
            None => None,
        };

        let filter = VideoFilter {
            user_id,
            ids: None,
            search,
        };
        debug!(?filter, "Listing videos");

        let videos = store
            .find_videos(&filter)
            .await
            .map_err(|e| ApiError::store("videos", e))
            .or_empty("videos");

        debug!(count = videos.len(), "Found videos");
        Ok(videos.into_iter().map(video_document_to_graphql).collect())
    }

    /// Get a video by ID
    async fn video(&self, ctx: &Context<'_>, id: ID) -> Result<Video> {
        let principal = ctx.require_principal()?;
        let store = store(ctx)?;
        info!(video_id = %id.as_str(), user_id = %principal.id, "Fetching video");

        let Some(video_id) = parse_object_id(&id) else {
            return Err(ApiError::not_found("Video").extend());
        };

        let video = store
            .find_video(video_id)
            .await
            .map_err(|e| ApiError::store("video", e).extend())?
            .ok_or_else(|| ApiError::not_found("Video").extend())?;

        Ok(video_document_to_graphql(video))
    }
}
