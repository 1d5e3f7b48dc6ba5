//! HTML views for the stats panel
//!
//! This module contains route handlers that render Askama templates for the
//! panel page and its live-updating partial.

pub mod panel;
pub mod sse;

use askama::Template;
use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::AppState;

#[derive(Template)]
#[template(path = "pages/404.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

/// 404 handler
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            path: uri.path().to_string(),
        },
    )
}

/// Build the HTML routes for the frontend
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(panel::page))
        .route("/panel", get(panel::partial))
        .route("/sse/stats", get(sse::stats_stream))
}
