//! Conversions from stored documents and service results to GraphQL types.
//!
//! All defaulting of absent fields lives here:
//! - identifiers become their hex string, an absent reference becomes `""`
//! - `description`, `name`, `url` default to `""`
//! - `avatar` defaults to [DEFAULT_AVATAR]
//! - id arrays default to empty

use async_graphql::ID;
use mongodb::bson::oid::ObjectId;

use crate::db::{PlaylistDocument, RestrictedUserDocument, VideoDocument};
use crate::services::{AuthOutcome, AuthUserInfo, YouTubeVideo};

use super::auth::Principal;
use super::types::{
    AuthPayload, Playlist, RestrictedUser, User, UserStatus, Video, YouTubeSearchResult,
};

/// Avatar shown for profiles that never picked one
pub const DEFAULT_AVATAR: &str = "default.png";

fn object_id(id: ObjectId) -> ID {
    ID(id.to_hex())
}

fn reference_id(id: Option<ObjectId>) -> ID {
    id.map(object_id).unwrap_or_else(|| ID(String::new()))
}

/// Convert a stored video to the GraphQL Video type
pub(crate) fn video_document_to_graphql(doc: VideoDocument) -> Video {
    Video {
        id: object_id(doc.id),
        name: doc.name.unwrap_or_default(),
        url: doc.url.unwrap_or_default(),
        description: doc.description.unwrap_or_default(),
        user_id: reference_id(doc.user_id),
    }
}

pub(crate) fn playlist_document_to_graphql(doc: PlaylistDocument) -> Playlist {
    Playlist {
        id: object_id(doc.id),
        name: doc.name.unwrap_or_default(),
        profiles: doc.profiles.into_iter().map(object_id).collect(),
        parent_user: reference_id(doc.parent_user),
    }
}

pub(crate) fn restricted_user_document_to_graphql(doc: RestrictedUserDocument) -> RestrictedUser {
    RestrictedUser {
        id: object_id(doc.id),
        name: doc.name.unwrap_or_default(),
        avatar: doc
            .avatar
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        parent_user: reference_id(doc.parent_user),
    }
}

/// Echo the token claims as a User. Fields the token does not carry stay empty.
pub(crate) fn principal_to_graphql(principal: &Principal) -> User {
    User {
        id: ID(principal.id.clone()),
        email: principal.email.clone().unwrap_or_default(),
        first_name: principal.first_name.clone().unwrap_or_default(),
        last_name: principal.last_name.clone().unwrap_or_default(),
        phone: None,
        country: None,
        status: None,
    }
}

pub(crate) fn auth_user_to_graphql(user: AuthUserInfo) -> User {
    User {
        id: ID(user.id),
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        phone: user.phone,
        country: user.country,
        status: user.status.as_deref().and_then(UserStatus::parse),
    }
}

pub(crate) fn auth_outcome_to_graphql(outcome: AuthOutcome) -> AuthPayload {
    AuthPayload {
        token: outcome.token,
        user_id: outcome.user_id.map(ID),
        requires_verification: outcome.requires_verification,
        is_new_user: outcome.is_new_user,
        message: outcome.message,
        user: outcome.user.map(auth_user_to_graphql),
    }
}

pub(crate) fn youtube_video_to_graphql(video: YouTubeVideo) -> YouTubeSearchResult {
    YouTubeSearchResult {
        id: video.id,
        title: video.title,
        description: video.description,
        thumbnail_url: video.thumbnail_url,
        channel_title: video.channel_title,
        published_at: video.published_at,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_video_defaults() {
        let id = ObjectId::new();
        let video = video_document_to_graphql(VideoDocument {
            id,
            name: None,
            url: None,
            description: None,
            user_id: None,
        });

        assert_eq!(
            video,
            Video {
                id: ID(id.to_hex()),
                name: String::new(),
                url: String::new(),
                description: String::new(),
                user_id: ID(String::new()),
            }
        );
    }

    #[test]
    fn test_video_ids_stringified() {
        let id = ObjectId::new();
        let owner = ObjectId::new();
        let video = video_document_to_graphql(VideoDocument {
            id,
            name: Some("Cat compilation".into()),
            url: Some("https://youtu.be/cats".into()),
            description: Some("Cats".into()),
            user_id: Some(owner),
        });
        assert_eq!(video.id.as_str(), id.to_hex());
        assert_eq!(video.user_id.as_str(), owner.to_hex());
        assert_eq!(video.description, "Cats");
    }

    #[test]
    fn test_playlist_keeps_profile_order() {
        let profiles = vec![ObjectId::new(), ObjectId::new(), ObjectId::new()];
        let parent = ObjectId::new();
        let playlist = playlist_document_to_graphql(PlaylistDocument {
            id: ObjectId::new(),
            name: Some("Bedtime".into()),
            profiles: profiles.clone(),
            videos: vec![],
            parent_user: Some(parent),
        });

        let expected: Vec<ID> = profiles.iter().map(|p| ID(p.to_hex())).collect();
        assert_eq!(playlist.profiles, expected);
        assert_eq!(playlist.parent_user.as_str(), parent.to_hex());
    }

    #[test]
    fn test_avatar_placeholder() {
        let profile = restricted_user_document_to_graphql(RestrictedUserDocument {
            id: ObjectId::new(),
            name: Some("Leo".into()),
            avatar: None,
            parent_user: None,
        });
        assert_eq!(profile.avatar, DEFAULT_AVATAR);
        assert_eq!(profile.parent_user.as_str(), "");

        let profile = restricted_user_document_to_graphql(RestrictedUserDocument {
            id: ObjectId::new(),
            name: Some("Mia".into()),
            avatar: Some("avatar3.png".into()),
            parent_user: None,
        });
        assert_eq!(profile.avatar, "avatar3.png");
    }

    #[test]
    fn test_principal_echo() {
        let user = principal_to_graphql(&Principal {
            id: "u1".into(),
            email: Some("p@example.com".into()),
            first_name: None,
            last_name: Some("Solis".into()),
        });
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.email, "p@example.com");
        assert_eq!(user.first_name, "");
        assert_eq!(user.last_name, "Solis");
        assert_eq!(user.status, None);
    }

    #[test]
    fn test_auth_outcome_status_parsed() {
        let payload = auth_outcome_to_graphql(AuthOutcome {
            token: Some("t".into()),
            user_id: Some("u1".into()),
            requires_verification: Some(true),
            is_new_user: Some(false),
            message: "Verification code sent".into(),
            user: Some(AuthUserInfo {
                id: "u1".into(),
                status: Some("pending_completion".into()),
                ..Default::default()
            }),
        });
        assert_eq!(payload.user_id, Some(ID("u1".into())));
        assert_eq!(
            payload.user.and_then(|u| u.status),
            Some(UserStatus::PendingCompletion)
        );
    }
}
