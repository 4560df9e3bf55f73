//! HTTP transport for CIDR overlap analysis
//!
//! Exposes the analyzer on a single route:
//!
//! - `POST /api/analyze-cidrs` with `{"cidrs": [...]}`
//! - `GET /healthz` liveness probe
//!
//! Requests are independent; the only shared state is the read-only
//! prefix-count limit from [`ServerConfig`].

pub mod config;
pub mod http;

pub use config::{ConfigError, ServerConfig};

use axum::{
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub const ANALYZE_ROUTE: &str = "/api/analyze-cidrs";

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Could not bind the listen address
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Listener failed while serving
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

/// Per-router state shared by handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub max_prefixes: usize,
}

impl From<&ServerConfig> for AppState {
    fn from(config: &ServerConfig) -> Self {
        Self {
            max_prefixes: config.max_prefixes,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            ANALYZE_ROUTE,
            post(http::analyze::analyze_cidrs).fallback(http::analyze::reject_method),
        )
        .route("/healthz", get(health::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

mod health {
    use axum::response::IntoResponse;
    pub async fn healthz() -> impl IntoResponse {
        "ok"
    }
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr.clone(),
            source,
        })?;

    info!(
        addr = %config.bind_addr,
        max_prefixes = config.max_prefixes,
        "server listening"
    );

    axum::serve(listener, build_router(AppState::from(&config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "unable to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
