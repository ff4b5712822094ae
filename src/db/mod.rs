//! Document store access
//!
//! The store is owned by the sibling REST backend; this service only reads
//! from it. [DocumentStore] is the seam: [mongo::MongoStore] talks to the
//! real database. With the `testing` feature, `memory::MemoryStore` keeps
//! documents in process.

pub mod documents;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod mongo;

use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

pub use documents::{PlaylistDocument, RestrictedUserDocument, VideoDocument};
#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Video query. Every criterion that is set must match.
#[derive(Debug, Clone, Default)]
pub struct VideoFilter {
    /// Owner of the video
    pub user_id: Option<ObjectId>,
    /// Restrict to these ids
    pub ids: Option<Vec<ObjectId>>,
    /// Case-insensitive substring of `name` or `description`
    pub search: Option<String>,
}

/// Playlist query. Every criterion that is set must match.
#[derive(Debug, Clone, Default)]
pub struct PlaylistFilter {
    pub parent_user: Option<ObjectId>,
    /// Playlist must be assigned to this profile
    pub profile: Option<ObjectId>,
}

/// Read operations the GraphQL layer needs from the store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_videos(&self, filter: &VideoFilter) -> Result<Vec<VideoDocument>>;

    async fn find_video(&self, id: ObjectId) -> Result<Option<VideoDocument>>;

    async fn find_playlists(&self, filter: &PlaylistFilter) -> Result<Vec<PlaylistDocument>>;

    async fn find_playlist(&self, id: ObjectId) -> Result<Option<PlaylistDocument>>;

    async fn find_restricted_users(&self, parent_user: ObjectId) -> Result<Vec<RestrictedUserDocument>>;

    async fn find_restricted_user(&self, id: ObjectId) -> Result<Option<RestrictedUserDocument>>;

    /// Round trip to check the store is reachable
    async fn ping(&self) -> Result<()>;
}

/// Parse an identifier argument into the store's native id.
///
/// Returns `None` for anything that is not a 24 character hex ObjectId.
pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id.trim()).ok()
}
