//! Dashboard server implementation
//!
//! HTTP server using Axum. Serves the dashboard page, its JSON view model and
//! the normalized database download.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::view::{RenderContext, DOWNLOAD_PATH};

/// Server bind configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Shared application state. Read-only; every request re-reads the workbooks.
#[derive(Clone)]
pub struct AppState {
    pub version: String,
    pub context: RenderContext,
}

impl AppState {
    pub fn new(context: RenderContext) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            context,
        }
    }
}

/// Build the router with all dashboard routes
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::page))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .route("/api/v1/dashboard", get(handlers::dashboard))
        .route("/api/v1/sensors", get(handlers::sensors))
        .route(DOWNLOAD_PATH, get(handlers::download))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the dashboard server until SIGINT/SIGTERM
pub async fn run_api_server(config: ApiConfig, context: RenderContext) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tray_wear_dashboard=info,tower_http=info".into()),
        )
        .init();

    info!(
        latest = %context.latest_path.display(),
        database = %context.database_path.display(),
        "serving sensor workbooks"
    );
    let app = build_router(Arc::new(AppState::new(context)));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Tray wear dashboard starting on http://{}", addr);
    info!("   Page: /, View model: /api/v1/dashboard, Download: {}", DOWNLOAD_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Tray wear dashboard shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
