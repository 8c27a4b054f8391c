//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the relay endpoint
//! - Wire up middleware (tracing, timeout, request ID)
//! - Hold shared state (upstream client, configuration)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::handler::relay_handler;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared upstream client; reqwest clients pool connections internally.
    pub client: reqwest::Client,
    pub config: Arc<RelayConfig>,
}

/// HTTP server for the image relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let state = AppState {
            client: reqwest::Client::new(),
            config: Arc::new(config.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The endpoint is mounted with `any(...)` so the handler owns the
    /// method gate and non-POST requests get the JSON 405 envelope instead
    /// of axum's default.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
