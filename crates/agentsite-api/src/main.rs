//! agentsite API server.

use agentsite_api::{AppState, routes};
use agentsite_config::{GeneratorConfig, PlatformConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let platform = PlatformConfig::from_env();
    if !platform.is_configured() {
        warn!("deployment token not set; site generation will answer in demo mode");
    }

    let generator = GeneratorConfig::from_env();
    if generator.is_none() {
        warn!("generator API key not set; social endpoints are disabled and sites use the built-in template");
    }

    let server = ServerConfig::from_env()?;

    // Create app state
    let state = AppState::new(platform, generator);

    // Build router
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    info!("Starting server on {}", server.bind);
    let listener = TcpListener::bind(server.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
