//! Typed views of the stored documents
//!
//! Only the fields this service reads are declared. Anything the sibling
//! backend may leave out is an `Option` or defaults to empty.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// `videos` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<ObjectId>,
}

/// `playlists` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    /// Restricted user ids, in assignment order
    #[serde(default)]
    pub profiles: Vec<ObjectId>,
    /// Video ids, in play order
    #[serde(default)]
    pub videos: Vec<ObjectId>,
    #[serde(rename = "parentUser", default)]
    pub parent_user: Option<ObjectId>,
}

/// `restrictedusers` collection
///
/// The stored PIN is deliberately not mapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictedUserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "parentUser", default)]
    pub parent_user: Option<ObjectId>,
}
