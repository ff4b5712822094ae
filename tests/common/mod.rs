//! Shared fixtures for the GraphQL integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_graphql::{Request, Response, Value};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use url::Url;

use kidstube_graphql::db::{MemoryStore, PlaylistDocument, RestrictedUserDocument, VideoDocument};
use kidstube_graphql::graphql::{
    KidsTubeSchema, Principal, RequestContext, RequestContextBuilder, SchemaServices, build_schema,
};
use kidstube_graphql::services::{
    CountriesClient, HttpFetch, UnavailableAuthService, UpstreamResponse, YouTubeClient,
};

pub const SECRET: &str = "integration-secret";

/// Canned upstream that counts calls
pub struct CountingFetch {
    status: u16,
    body: String,
    calls: AtomicUsize,
}

impl CountingFetch {
    pub fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpFetch for CountingFetch {
    async fn get(&self, _url: &Url, _query: &[(&str, &str)]) -> Result<UpstreamResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(UpstreamResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

pub struct Harness {
    pub schema: KidsTubeSchema,
    pub store: Arc<MemoryStore>,
    pub http: Arc<CountingFetch>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_upstream(CountingFetch::new(200, r#"{"items":[]}"#), Some("yt-key"))
    }

    pub fn with_upstream(http: Arc<CountingFetch>, youtube_key: Option<&str>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let schema = build_schema(SchemaServices {
            store: store.clone(),
            countries: CountriesClient::new(
                http.clone(),
                Url::parse("http://backend.test:3001").unwrap(),
            ),
            youtube: YouTubeClient::new(
                http.clone(),
                Url::parse("https://youtube.test/youtube/v3/search").unwrap(),
                youtube_key.map(str::to_string),
            ),
            auth: Arc::new(UnavailableAuthService),
        });
        Self { schema, store, http }
    }

    pub async fn anonymous(&self, query: &str) -> Response {
        self.schema
            .execute(Request::new(query).data(RequestContext::anonymous()))
            .await
    }

    pub async fn as_user(&self, user_id: ObjectId, query: &str) -> Response {
        let context = RequestContext::authenticated(principal(user_id), "token");
        self.schema.execute(Request::new(query).data(context)).await
    }
}

pub fn principal(user_id: ObjectId) -> Principal {
    Principal {
        id: user_id.to_hex(),
        email: Some("parent@example.com".to_string()),
        first_name: Some("Ana".to_string()),
        last_name: Some("Mora".to_string()),
    }
}

pub fn sign_token(user_id: ObjectId, expires_in: Duration) -> String {
    let claims = json!({
        "id": user_id.to_hex(),
        "email": "parent@example.com",
        "firstName": "Ana",
        "lastName": "Mora",
        "iat": Utc::now().timestamp(),
        "exp": (Utc::now() + expires_in).timestamp(),
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

pub fn context_builder() -> RequestContextBuilder {
    RequestContextBuilder::new(SECRET)
}

pub fn video(name: &str, description: Option<&str>, owner: ObjectId) -> VideoDocument {
    VideoDocument {
        id: ObjectId::new(),
        name: Some(name.to_string()),
        url: Some(format!("https://youtu.be/{}", name.to_lowercase().replace(' ', "-"))),
        description: description.map(str::to_string),
        user_id: Some(owner),
    }
}

pub fn playlist(name: &str, owner: ObjectId, profiles: Vec<ObjectId>, videos: Vec<ObjectId>) -> PlaylistDocument {
    PlaylistDocument {
        id: ObjectId::new(),
        name: Some(name.to_string()),
        profiles,
        videos,
        parent_user: Some(owner),
    }
}

pub fn profile(name: &str, parent: ObjectId, avatar: Option<&str>) -> RestrictedUserDocument {
    RestrictedUserDocument {
        id: ObjectId::new(),
        name: Some(name.to_string()),
        avatar: avatar.map(str::to_string),
        parent_user: Some(parent),
    }
}

pub fn data(response: Response) -> serde_json::Value {
    assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
    response.data.into_json().unwrap()
}

/// `extensions.code` of the first error
pub fn error_code(response: &Response) -> Option<String> {
    let error = response.errors.first()?;
    match error.extensions.as_ref()?.get("code")? {
        Value::String(code) => Some(code.clone()),
        _ => None,
    }
}
