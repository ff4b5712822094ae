//! KidsTube GraphQL gateway - entry point
//!
//! All operations are exposed via GraphQL at /graphql.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kidstube_graphql::db::{DocumentStore, MongoStore};
use kidstube_graphql::graphql::{RequestContextBuilder, SchemaServices, build_schema};
use kidstube_graphql::services::{
    AuthService, CountriesClient, HttpFetch, ReqwestFetch, UnavailableAuthService, YouTubeClient,
};
use kidstube_graphql::{AppState, Config, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kidstube_graphql=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting KidsTube GraphQL gateway");

    let config = Arc::new(Config::from_env()?);
    tracing::info!(config = ?config, "Configuration loaded");

    let store: Arc<dyn DocumentStore> = Arc::new(
        MongoStore::connect(&config.mongo_uri, config.mongo_database.as_deref()).await?,
    );
    if let Err(e) = store.ping().await {
        tracing::error!(error = %e, "MongoDB connection error");
        return Err(e);
    }
    tracing::info!("MongoDB connected");

    let http: Arc<dyn HttpFetch> = Arc::new(ReqwestFetch::new(reqwest::Client::new()));
    let auth: Arc<dyn AuthService> = Arc::new(UnavailableAuthService);

    let schema = build_schema(SchemaServices {
        store: store.clone(),
        countries: CountriesClient::new(http.clone(), config.backend_url.clone()),
        youtube: YouTubeClient::new(
            http,
            config.youtube_api_url.clone(),
            config.youtube_api_key.clone(),
        ),
        auth,
    });
    if config.youtube_api_key.is_none() {
        tracing::warn!("YOUTUBE_API_KEY is not set; youtubeSearch will fail");
    }
    tracing::info!("GraphQL schema built");

    let state = AppState {
        schema,
        context_builder: RequestContextBuilder::new(&config.jwt_secret),
        store,
    };
    let app = build_app(state, &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL endpoint: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
