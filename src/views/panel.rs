//! Stats panel view

use askama::Template;
use axum::{extract::State, response::IntoResponse};

use crate::stats::StatsDisplay;
use crate::AppState;

#[derive(Template)]
#[template(path = "pages/panel.html")]
pub struct PanelTemplate {
    pub version: String,
    pub host_url: String,
    pub show_stats: bool,
    pub stats: StatsDisplay,
}

#[derive(Template)]
#[template(path = "partials/stats_panel.html")]
pub struct StatsPanelTemplate {
    pub stats: StatsDisplay,
}

/// Render the panel page
pub async fn page(State(state): State<AppState>) -> impl IntoResponse {
    let sample = state.feed.latest();

    PanelTemplate {
        version: env!("CARGO_PKG_VERSION").to_string(),
        host_url: state.config.host.url.clone(),
        show_stats: state.config.panel.show_stats,
        stats: StatsDisplay::for_panel(state.config.panel.show_stats, sample.as_ref()),
    }
    .into_response()
}

/// Render just the stats partial (fetched by the page on load)
pub async fn partial(State(state): State<AppState>) -> impl IntoResponse {
    let sample = state.feed.latest();

    StatsPanelTemplate {
        stats: StatsDisplay::for_panel(state.config.panel.show_stats, sample.as_ref()),
    }
    .into_response()
}
