//! GraphQL type definitions
//!
//! These are the shapes exposed to clients. Stored documents are converted
//! into them by [super::mapper]; nothing here is read straight from the store.

use std::sync::Arc;

use async_graphql::{ComplexObject, Context, Enum, ID, Object, SimpleObject};
use serde_json::Value;

use crate::db::DocumentStore;
use crate::error::FailOpen;

use super::queries::playlists::playlist_videos;

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct Video {
    pub id: ID,
    pub name: String,
    pub url: String,
    pub description: String,
    pub user_id: ID,
}

/// Account status of a parent user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(rename_items = "snake_case")]
pub enum UserStatus {
    Pending,
    Active,
    PendingCompletion,
}

impl UserStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "pending_completion" => Some(Self::PendingCompletion),
            _ => None,
        }
    }
}

/// Parent account
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub status: Option<UserStatus>,
}

/// Child profile managed by a parent
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct RestrictedUser {
    pub id: ID,
    pub name: String,
    pub avatar: String,
    pub parent_user: ID,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(complex)]
pub struct Playlist {
    pub id: ID,
    pub name: String,
    pub profiles: Vec<ID>,
    pub parent_user: ID,
}

#[ComplexObject]
impl Playlist {
    /// Videos in play order. Resolves to an empty list on any failure.
    async fn videos(&self, ctx: &Context<'_>) -> Vec<Video> {
        let Ok(store) = ctx.data::<Arc<dyn DocumentStore>>() else {
            tracing::warn!("Document store missing from schema data");
            return Vec::new();
        };
        playlist_videos(store.as_ref(), &self.id)
            .await
            .or_empty("playlist.videos")
    }
}

/// Result of an identity mutation
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct AuthPayload {
    pub token: Option<String>,
    pub user_id: Option<ID>,
    pub requires_verification: Option<bool>,
    pub is_new_user: Option<bool>,
    pub message: String,
    pub user: Option<User>,
}

/// Country as returned by the backend, passed through unmodified
#[derive(Debug, Clone, PartialEq)]
pub struct Country(pub Value);

impl Country {
    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

#[Object]
impl Country {
    async fn code(&self) -> &str {
        self.text("code").unwrap_or_default()
    }

    async fn name(&self) -> &str {
        self.text("name").unwrap_or_default()
    }

    async fn dial_code(&self) -> &str {
        self.text("dialCode").unwrap_or_default()
    }

    async fn flag(&self) -> Option<&str> {
        self.text("flag")
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct YouTubeSearchResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    pub published_at: String,
}
