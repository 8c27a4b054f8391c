//! Image Relay
//!
//! A single-endpoint HTTP relay built with Tokio and Axum. Clients POST a
//! JSON control message naming an upstream image URL and one of four
//! actions; the relay fetches the image once and returns it raw, truncated
//! to a 16 KiB preview, or wrapped in a base64 JSON envelope.

use std::path::Path;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_relay::config::{apply_env_overrides, load_config, RelayConfig};
use image_relay::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("image-relay v{} starting", env!("CARGO_PKG_VERSION"));

    // Load configuration from the optional path argument, defaults otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => {
            let mut config = RelayConfig::default();
            apply_env_overrides(&mut config);
            config
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        auth_enabled = config.auth.api_key.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics server
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            image_relay::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
