//! packwatch - a live compression statistics panel for printer hosts running
//! the MeatPack G-code packing plugin.
//!
//! The host's plugin endpoint is polled for transmission statistics; samples
//! flow through a watch channel into an HTML panel (with SSE live updates)
//! and a small JSON API. The packing codec itself is carried for size
//! estimation.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Notify;

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod pack;
pub mod services;
pub mod static_files;
pub mod stats;
pub mod views;

use crate::config::Config;
use crate::stats::StatsFeed;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Latest-sample feed the render paths subscribe to.
    pub feed: StatsFeed,
    /// Signals the poller to fetch immediately.
    pub refresh: Arc<Notify>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            feed: StatsFeed::new(),
            refresh: Arc::new(Notify::new()),
        }
    }
}

/// Build the full application router.
///
/// Shared between `main` and the integration tests so both serve the exact
/// same surface.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/stats", get(api::stats::get_stats))
        .route("/refresh", post(api::stats::refresh))
        .route("/estimate", post(api::stats::estimate));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .merge(views::routes())
        .route("/static/*path", get(static_files::serve_static))
        .fallback(views::not_found)
        .with_state(state)
}

#[derive(serde::Serialize)]
struct HealthResponse {
    message: String,
    version: String,
}

async fn health_check() -> axum::response::Json<HealthResponse> {
    axum::response::Json(HealthResponse {
        message: "packwatch is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
