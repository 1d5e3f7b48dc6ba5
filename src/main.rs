use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use packwatch::config::Config;
use packwatch::services::{HostClient, Poller};
use packwatch::{router, AppState};

fn init_tracing() {
    // Initialize tracing with env-filter
    // RUST_LOG environment variable controls log levels
    // Default: debug for our crate, info for axum, warn for dependencies
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("packwatch=debug,tower_http=debug,axum=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    // Initialize tracing first so we can log configuration loading
    init_tracing();

    tracing::info!("Starting packwatch v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match Config::load() {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            tracing::debug!("Server: {}:{}", cfg.server.bind, cfg.server.port);
            tracing::debug!("Printer host: {}", cfg.host.url);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Create the host client
    let host_client = match HostClient::new_shared(
        &config.host.url,
        config.host.api_key.clone(),
        Duration::from_secs(config.host.request_timeout_secs),
    ) {
        Ok(client) => {
            tracing::info!("Printer host client initialized for {}", config.host.url);
            client
        }
        Err(e) => {
            tracing::error!("Failed to create printer host client: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(config);

    // No point polling the host when the panel never displays the numbers.
    if state.config.panel.show_stats {
        Poller::new(
            host_client,
            state.feed.clone(),
            Arc::clone(&state.refresh),
            Duration::from_secs(state.config.host.poll_interval_secs),
        )
        .spawn();
    } else {
        tracing::info!("Statistics display disabled - host polling suspended");
    }

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any);

    let app = router(state.clone()).layer(cors);

    let addr = state.config.server_addr();
    tracing::info!("packwatch listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
