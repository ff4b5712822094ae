use std::collections::HashMap;

use super::prelude::*;

use crate::db::{PlaylistFilter, VideoFilter};

#[derive(Default)]
pub struct PlaylistQueries;

/// Resolve the videos of a playlist, in playlist order.
///
/// Re-reads the playlist by id and fetches its videos in one query. An empty
/// playlist returns without touching the videos collection.
pub(crate) async fn playlist_videos(
    store: &dyn DocumentStore,
    playlist_id: &str,
) -> Result<Vec<Video>, ApiError> {
    let Some(id) = parse_object_id(playlist_id) else {
        return Ok(Vec::new());
    };

    debug!(playlist_id = %id, "Fetching videos for playlist");
    let Some(playlist) = store
        .find_playlist(id)
        .await
        .map_err(|e| ApiError::store("playlist", e))?
    else {
        return Ok(Vec::new());
    };

    if playlist.videos.is_empty() {
        return Ok(Vec::new());
    }

    let found = store
        .find_videos(&VideoFilter {
            ids: Some(playlist.videos.clone()),
            ..Default::default()
        })
        .await
        .map_err(|e| ApiError::store("playlist videos", e))?;

    let mut by_id: HashMap<_, _> = found.into_iter().map(|v| (v.id, v)).collect();
    Ok(playlist
        .videos
        .iter()
        .filter_map(|id| by_id.remove(id))
        .map(video_document_to_graphql)
        .collect())
}

#[Object]
impl PlaylistQueries {
    /// List playlists, optionally only those owned by `userId`
    #[graphql(guard = "AuthGuard")]
    async fn playlists(&self, ctx: &Context<'_>, user_id: Option<ID>) -> Result<Vec<Playlist>> {
        let store = store(ctx)?;

        let parent_user = match non_blank(user_id.as_deref()) {
            Some(raw) => match parse_object_id(&raw) {
                Some(id) => Some(id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let filter = PlaylistFilter {
            parent_user,
            profile: None,
        };
        debug!(?filter, "Listing playlists");

        let playlists = store
            .find_playlists(&filter)
            .await
            .map_err(|e| ApiError::store("playlists", e))
            .or_empty("playlists");

        Ok(playlists
            .into_iter()
            .map(playlist_document_to_graphql)
            .collect())
    }

    /// Get a playlist by ID
    async fn playlist(&self, ctx: &Context<'_>, id: ID) -> Result<Playlist> {
        let principal = ctx.require_principal()?;
        let store = store(ctx)?;
        info!(playlist_id = %id.as_str(), user_id = %principal.id, "Fetching playlist");

        let Some(playlist_id) = parse_object_id(&id) else {
            return Err(ApiError::not_found("Playlist").extend());
        };

        let playlist = store
            .find_playlist(playlist_id)
            .await
            .map_err(|e| ApiError::store("playlist", e).extend())?
            .ok_or_else(|| ApiError::not_found("Playlist").extend())?;

        Ok(playlist_document_to_graphql(playlist))
    }

    /// Playlists assigned to a restricted user profile
    #[graphql(guard = "AuthGuard")]
    async fn playlists_by_user(&self, ctx: &Context<'_>, user_id: ID) -> Result<Vec<Playlist>> {
        let store = store(ctx)?;

        let Some(profile) = parse_object_id(&user_id) else {
            return Ok(Vec::new());
        };

        let playlists = store
            .find_playlists(&PlaylistFilter {
                parent_user: None,
                profile: Some(profile),
            })
            .await
            .map_err(|e| ApiError::store("user playlists", e))
            .or_empty("playlistsByUser");

        Ok(playlists
            .into_iter()
            .map(playlist_document_to_graphql)
            .collect())
    }
}
