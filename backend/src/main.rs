//! AgriShield - Backend Server
//!
//! Parametric micro-insurance and micro-credit decisioning for smallholder
//! farmers.

use std::net::SocketAddr;

use agrishield_backend::{create_app, AppState, Config};
use agrishield_engine::Engine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "agrishield_server=debug,agrishield_backend=debug,agrishield_engine=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting AgriShield Server");
    tracing::info!("Environment: {}", config.environment);

    // Build the engine from reference data
    let engine = Engine::new(config.engine_config()?)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::new(engine, config);

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
