mod config;
mod errors;
mod models;
mod portfolio;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::portfolio::PortfolioRenderer;
use crate::resume::name::GazetteerRecognizer;
use crate::resume::ResumeParser;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting folio v{}", env!("CARGO_PKG_VERSION"));

    // Load the name recognizer once; shared read-only by every upload
    let recognizer = GazetteerRecognizer::load(config.name_gazetteer_path.as_deref());
    info!("Name recognizer initialized ({} given names)", recognizer.len());
    let parser = Arc::new(ResumeParser::new(Arc::new(recognizer)));

    if !PortfolioRenderer::has_template(&config.template_name) {
        warn!(
            "Portfolio template '{}' is not registered; uploads will fail to render",
            config.template_name
        );
    }
    let renderer = PortfolioRenderer::new(config.template_name.clone());

    // Build app state
    let state = AppState {
        config: config.clone(),
        parser,
        renderer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
