use super::prelude::*;

use crate::services::{CountriesClient, YouTubeClient};

#[derive(Default)]
pub struct ExternalQueries;

#[Object]
impl ExternalQueries {
    /// Countries as provided by the backend
    async fn countries(&self, ctx: &Context<'_>) -> Result<Vec<Country>> {
        let client = ctx.data::<CountriesClient>()?;
        let countries = client.list().await.map_err(|e| e.extend())?;
        Ok(countries.into_iter().map(Country).collect())
    }

    /// Search YouTube for videos
    async fn youtube_search(&self, ctx: &Context<'_>, query: String) -> Result<Vec<YouTubeSearchResult>> {
        let client = ctx.data::<YouTubeClient>()?;
        let videos = client.search(&query).await.map_err(|e| e.extend())?;
        Ok(videos.into_iter().map(youtube_video_to_graphql).collect())
    }
}
