//! In-process store
//!
//! Applies the same filter semantics as the MongoDB queries. Counts the
//! queries issued per collection so callers can assert on store traffic.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use parking_lot::RwLock;

use super::{
    DocumentStore, PlaylistDocument, PlaylistFilter, RestrictedUserDocument, VideoDocument,
    VideoFilter,
};

#[derive(Default)]
pub struct MemoryStore {
    videos: RwLock<Vec<VideoDocument>>,
    playlists: RwLock<Vec<PlaylistDocument>>,
    restricted_users: RwLock<Vec<RestrictedUserDocument>>,
    video_queries: AtomicUsize,
    playlist_queries: AtomicUsize,
    restricted_user_queries: AtomicUsize,
    failing: RwLock<Failures>,
}

#[derive(Default, Clone, Copy)]
struct Failures {
    all: bool,
    videos: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Collection {
    Videos,
    Playlists,
    RestrictedUsers,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_video(&self, video: VideoDocument) {
        self.videos.write().push(video);
    }

    pub fn insert_playlist(&self, playlist: PlaylistDocument) {
        self.playlists.write().push(playlist);
    }

    pub fn insert_restricted_user(&self, profile: RestrictedUserDocument) {
        self.restricted_users.write().push(profile);
    }

    /// Make every subsequent query fail, as if the database were unreachable
    pub fn set_failing(&self, failing: bool) {
        self.failing.write().all = failing;
    }

    /// Make only queries against the videos collection fail
    pub fn set_videos_failing(&self, failing: bool) {
        self.failing.write().videos = failing;
    }

    /// Number of queries issued against the videos collection
    pub fn video_queries(&self) -> usize {
        self.video_queries.load(Ordering::SeqCst)
    }

    pub fn playlist_queries(&self) -> usize {
        self.playlist_queries.load(Ordering::SeqCst)
    }

    pub fn restricted_user_queries(&self) -> usize {
        self.restricted_user_queries.load(Ordering::SeqCst)
    }

    /// Record a query and fail it if a failure is armed for the collection
    fn check(&self, collection: Collection) -> Result<()> {
        let counter = match collection {
            Collection::Videos => &self.video_queries,
            Collection::Playlists => &self.playlist_queries,
            Collection::RestrictedUsers => &self.restricted_user_queries,
        };
        counter.fetch_add(1, Ordering::SeqCst);

        let failures = *self.failing.read();
        if failures.all || (failures.videos && collection == Collection::Videos) {
            bail!("store unavailable");
        }
        Ok(())
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

fn video_matches(video: &VideoDocument, filter: &VideoFilter) -> bool {
    if let Some(user_id) = filter.user_id
        && video.user_id != Some(user_id)
    {
        return false;
    }

    if let Some(ids) = &filter.ids
        && !ids.contains(&video.id)
    {
        return false;
    }

    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        if !contains_ignore_case(video.name.as_deref(), &needle)
            && !contains_ignore_case(video.description.as_deref(), &needle)
        {
            return false;
        }
    }

    true
}

fn playlist_matches(playlist: &PlaylistDocument, filter: &PlaylistFilter) -> bool {
    filter.parent_user.is_none_or(|p| playlist.parent_user == Some(p))
        && filter.profile.is_none_or(|p| playlist.profiles.contains(&p))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_videos(&self, filter: &VideoFilter) -> Result<Vec<VideoDocument>> {
        self.check(Collection::Videos)?;
        Ok(self
            .videos
            .read()
            .iter()
            .filter(|v| video_matches(v, filter))
            .cloned()
            .collect())
    }

    async fn find_video(&self, id: ObjectId) -> Result<Option<VideoDocument>> {
        self.check(Collection::Videos)?;
        Ok(self.videos.read().iter().find(|v| v.id == id).cloned())
    }

    async fn find_playlists(&self, filter: &PlaylistFilter) -> Result<Vec<PlaylistDocument>> {
        self.check(Collection::Playlists)?;
        Ok(self
            .playlists
            .read()
            .iter()
            .filter(|p| playlist_matches(p, filter))
            .cloned()
            .collect())
    }

    async fn find_playlist(&self, id: ObjectId) -> Result<Option<PlaylistDocument>> {
        self.check(Collection::Playlists)?;
        Ok(self.playlists.read().iter().find(|p| p.id == id).cloned())
    }

    async fn find_restricted_users(&self, parent_user: ObjectId) -> Result<Vec<RestrictedUserDocument>> {
        self.check(Collection::RestrictedUsers)?;
        Ok(self
            .restricted_users
            .read()
            .iter()
            .filter(|r| r.parent_user == Some(parent_user))
            .cloned()
            .collect())
    }

    async fn find_restricted_user(&self, id: ObjectId) -> Result<Option<RestrictedUserDocument>> {
        self.check(Collection::RestrictedUsers)?;
        Ok(self.restricted_users.read().iter().find(|r| r.id == id).cloned())
    }

    async fn ping(&self) -> Result<()> {
        if self.failing.read().all {
            bail!("store unavailable");
        }
        Ok(())
    }
}
