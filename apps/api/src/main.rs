mod assistant;
mod config;
mod errors;
mod llm_client;
mod profile;
mod render;
mod reveal;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::SessionStore;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::profile::ProfileStore;
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting Vitae v{}", env!("CARGO_PKG_VERSION"));

    // Load the profile store once; it is never mutated afterwards
    let profile = Arc::new(
        ProfileStore::load(config.profile_path.as_deref()).context("Failed to load profile")?,
    );
    info!(
        "Profile loaded: {} ({} experience, {} education entries)",
        profile.personal_info().name,
        profile.experience().len(),
        profile.education().len()
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let sessions = Arc::new(SessionStore::new(
        Arc::clone(&profile),
        Arc::new(llm),
        config.max_sessions,
        config.session_idle_ttl,
    ));
    info!(
        "Assistant sessions capped at {}, idle expiry after {}s",
        config.max_sessions,
        config.session_idle_ttl.as_secs()
    );

    let state = AppState { profile, sessions };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the page origin once it is deployed behind a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
