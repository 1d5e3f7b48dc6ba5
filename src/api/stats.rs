//! Statistics API endpoints.

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::format;
use crate::pack;
use crate::stats::{StatsDisplay, TransmissionSample};
use crate::AppState;

// =============================================================================
// Response Types
// =============================================================================

/// Latest sample plus the derived display strings.
///
/// Mirrors the plugin backend's status response, extended with the formatted
/// fields so API consumers don't have to re-derive them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub transmission_stats: Option<TransmissionSample>,
    pub enabled: Option<bool>,
    pub has_data: bool,
    pub display: StatsDisplay,
}

/// Response for a scheduled refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
}

/// Packing estimate for a submitted G-code body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub total_bytes: u64,
    pub packed_bytes: u64,
    pub ratio: String,
    pub total_display: String,
    pub packed_display: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/stats - latest transmission statistics.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let sample = state.feed.latest();
    let display = StatsDisplay::for_panel(state.config.panel.show_stats, sample.as_ref());

    Ok(Json(StatsResponse {
        enabled: sample.as_ref().map(|s| s.enabled),
        has_data: sample.is_some(),
        transmission_stats: sample,
        display,
    }))
}

/// POST /api/refresh - trigger an immediate poll of the printer host.
pub async fn refresh(State(state): State<AppState>) -> Json<RefreshResponse> {
    state.refresh.notify_one();
    Json(RefreshResponse {
        success: true,
        message: "Refresh scheduled".to_string(),
    })
}

/// POST /api/estimate - pack a G-code body and report the size savings.
pub async fn estimate(body: String) -> Result<Json<EstimateResponse>> {
    if body.trim().is_empty() {
        return Err(AppError::BadRequest("empty G-code body".to_string()));
    }

    let total_bytes = body.len() as u64;
    let packed = pack::pack_gcode(&body);
    let packed_bytes = packed.len() as u64;

    tracing::debug!(total_bytes, packed_bytes, "Computed packing estimate");

    Ok(Json(EstimateResponse {
        total_bytes,
        packed_bytes,
        ratio: format::format_ratio(packed_bytes as f64, total_bytes as f64),
        total_display: format::format_byte_size(total_bytes as f64, 3),
        packed_display: format::format_byte_size(packed_bytes as f64, 3),
    }))
}
