//! InsideOut backend API entry point.
//!
//! Initializes tracing, loads configuration from environment variables,
//! performs the one-time database connectivity probe, sets up the Axum
//! router with all routes, and starts the HTTP server.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use insideout_api::config::{AppConfig, BIND_HOST, DEBUG_LOG_FILTER, DEFAULT_LOG_FILTER};
use insideout_api::db::Database;
use insideout_api::routes::create_router;
use insideout_api::state::AppState;

/// InsideOut backend API server
#[derive(Parser, Debug)]
#[command(name = "insideout-api", version, about)]
struct Args {
    /// Log level filter (e.g., "insideout_api=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from the environment
    let config = AppConfig::from_env()?;

    // Initialize tracing with priority: CLI > env > default (debug-aware)
    let default_filter = if config.debug {
        DEBUG_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| default_filter.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        debug = config.debug,
        ai_available = config.ai_available(),
        has_database_credentials = config.has_database_credentials(),
        "Loaded configuration"
    );

    if config.uses_default_secret() {
        tracing::warn!(
            "JWT_SECRET is unset; using the insecure default. \
             Set JWT_SECRET before serving real traffic."
        );
    }

    // One-time database probe. A failure degrades the reported status but
    // never prevents startup; the stored flag stays fixed until restart.
    let db = Database::from_config(&config);
    let database_connected = match &db {
        Some(db) => db.probe().await,
        None => {
            tracing::warn!("Database credentials not configured, starting in degraded mode");
            false
        }
    };

    // Create application state and router
    let state = AppState::new(config.clone(), db, database_connected);
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from((BIND_HOST, config.port));
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Completes when SIGTERM or Ctrl+C is received, draining connections.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
