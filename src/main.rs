//! Gatehouse: a minimal hardened HTTP service skeleton.
//!
//! This is the application entry point. It initializes tracing, validates
//! configuration from environment variables, sets up the Axum router with the
//! security middleware pipeline, and starts the HTTP server. Startup is
//! strictly sequential: no connection is accepted before validation succeeds.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatehouse::config::{AppConfig, DEFAULT_LOG_FILTER};
use gatehouse::routes::create_router;
use gatehouse::service::GreetingService;
use gatehouse::state::AppState;

/// Gatehouse: a minimal hardened HTTP service skeleton
#[derive(Parser, Debug)]
#[command(name = "gatehouse", version, about)]
struct Args {
    /// Listen port (overrides the PORT environment variable)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level filter (e.g., "gatehouse=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration before anything listens; a violation here is
    // fatal and reports every failed constraint at once
    let mut config = AppConfig::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    tracing::info!(
        environment = %config.environment,
        port = config.port,
        has_api_key = config.api_key.is_some(),
        has_database_url = config.database_url.is_some(),
        "Loaded configuration"
    );

    // Create application state and router
    let state = AppState::new(config.clone(), GreetingService);
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
