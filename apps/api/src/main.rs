mod config;
mod errors;
mod gateway;
mod llm_client;
mod models;
mod routes;
mod state;
mod storage;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::RedisSnapshotStore;
use crate::store::ids::UuidIds;
use crate::store::sessions::SessionManager;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FolioForge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Redis (publish slot backend)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let storage = Arc::new(RedisSnapshotStore::new(redis));
    info!("Redis snapshot store initialized");

    // Initialize the generative client
    let llm = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
    info!(
        "Gemini client initialized (text: {}, image: {})",
        llm_client::TEXT_MODEL,
        llm_client::IMAGE_MODEL
    );

    // One independent in-memory store per session, UUID ids in production
    let sessions = SessionManager::new(Arc::new(UuidIds));

    // Build app state
    let state = AppState {
        sessions,
        llm,
        storage,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
