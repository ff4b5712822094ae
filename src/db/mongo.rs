//! MongoDB-backed store

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection, Database};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    DocumentStore, PlaylistDocument, PlaylistFilter, RestrictedUserDocument, VideoDocument,
    VideoFilter,
};

const VIDEOS: &str = "videos";
const PLAYLISTS: &str = "playlists";
const RESTRICTED_USERS: &str = "restrictedusers";

/// Database opened when neither the caller nor the URI names one
pub const DEFAULT_DATABASE: &str = "kidstube";

/// Store over a shared, driver-pooled MongoDB client
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect using a connection string.
    ///
    /// `database` wins over the database named in the URI; with neither,
    /// [DEFAULT_DATABASE] is used.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("Failed to create MongoDB client")?;

        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        Ok(Self { db })
    }

    fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection::<T>(name)
    }

    async fn find_many<T>(&self, name: &str, filter: Document) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        debug!(collection = name, filter = %filter, "Executing find");
        let cursor = self
            .collection::<T>(name)
            .find(filter)
            .await
            .with_context(|| format!("find on {name} failed"))?;
        let docs: Vec<T> = cursor
            .try_collect()
            .await
            .with_context(|| format!("reading {name} cursor failed"))?;
        debug!(collection = name, count = docs.len(), "Find returned documents");
        Ok(docs)
    }

    async fn find_by_id<T>(&self, name: &str, id: ObjectId) -> Result<Option<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        self.collection::<T>(name)
            .find_one(doc! { "_id": id })
            .await
            .with_context(|| format!("find_one on {name} failed"))
    }
}

/// Build the MongoDB query document for a video filter
pub(crate) fn video_query(filter: &VideoFilter) -> Document {
    let mut query = Document::new();

    if let Some(user_id) = filter.user_id {
        query.insert("userId", user_id);
    }

    if let Some(ids) = &filter.ids {
        query.insert("_id", doc! { "$in": ids.clone() });
    }

    if let Some(search) = &filter.search {
        let pattern = regex::escape(search);
        query.insert(
            "$or",
            vec![
                doc! { "name": { "$regex": pattern.as_str(), "$options": "i" } },
                doc! { "description": { "$regex": pattern.as_str(), "$options": "i" } },
            ],
        );
    }

    query
}

/// Build the MongoDB query document for a playlist filter
pub(crate) fn playlist_query(filter: &PlaylistFilter) -> Document {
    let mut query = Document::new();

    if let Some(parent_user) = filter.parent_user {
        query.insert("parentUser", parent_user);
    }

    // Equality against an array field matches when any element is equal
    if let Some(profile) = filter.profile {
        query.insert("profiles", profile);
    }

    query
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_videos(&self, filter: &VideoFilter) -> Result<Vec<VideoDocument>> {
        self.find_many(VIDEOS, video_query(filter)).await
    }

    async fn find_video(&self, id: ObjectId) -> Result<Option<VideoDocument>> {
        self.find_by_id(VIDEOS, id).await
    }

    async fn find_playlists(&self, filter: &PlaylistFilter) -> Result<Vec<PlaylistDocument>> {
        self.find_many(PLAYLISTS, playlist_query(filter)).await
    }

    async fn find_playlist(&self, id: ObjectId) -> Result<Option<PlaylistDocument>> {
        self.find_by_id(PLAYLISTS, id).await
    }

    async fn find_restricted_users(&self, parent_user: ObjectId) -> Result<Vec<RestrictedUserDocument>> {
        self.find_many(RESTRICTED_USERS, doc! { "parentUser": parent_user })
            .await
    }

    async fn find_restricted_user(&self, id: ObjectId) -> Result<Option<RestrictedUserDocument>> {
        self.find_by_id(RESTRICTED_USERS, id).await
    }

    async fn ping(&self) -> Result<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;
        Ok(())
    }
}
