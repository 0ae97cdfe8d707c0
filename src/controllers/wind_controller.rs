use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::config::{Config, DistrictConfig};
use crate::models::wind::{
    DistrictProjectionResponse, DistrictWindResponse, HealthStatus, OfflineMode, ProjectionQuery,
    ProjectionResult, WindReading,
};
use crate::services::{projection, wind_service};
use crate::shared_state::AppState;

fn find_district<'a>(config: &'a Config, id: &str) -> Option<&'a DistrictConfig> {
    config.districts.iter().find(|d| d.id == id)
}

/// Latest reading for a district, falling back to the static baseline when
/// the background refresh has not populated the map yet.
fn reading_for(state: &AppState, district: &DistrictConfig) -> WindReading {
    state
        .get_reading(&district.id)
        .unwrap_or_else(|| wind_service::baseline_reading(district))
}

/// GET /api/districts
/// List all configured districts
///
/// Returns the static reference table: name, coordinates, baseline wind
/// speed, and data source for every district.
#[utoipa::path(
    get,
    path = "/api/districts",
    responses(
        (status = 200, description = "List of configured districts", body = Vec<DistrictConfig>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_districts(State(config): State<Config>) -> impl IntoResponse {
    Json(config.districts).into_response()
}

/// GET /api/districts/{id}/wind
/// Current wind reading for a district
///
/// Returns the latest wind speed, whether it came from the weather API or
/// the baseline table, and the fallback warning flag. Updated periodically
/// in the background.
#[utoipa::path(
    get,
    path = "/api/districts/{id}/wind",
    params(
        ("id" = String, Path, description = "Unique district ID")
    ),
    responses(
        (status = 200, description = "Current wind reading", body = DistrictWindResponse),
        (status = 404, description = "District not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_district_wind(
    Path(id): Path<String>,
    State(config): State<Config>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let Some(district) = find_district(&config, &id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "District not found"})),
        )
            .into_response();
    };
    let response = DistrictWindResponse {
        timestamp: chrono::Utc::now(),
        district_id: district.id.clone(),
        data: reading_for(&state, district),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/districts/{id}/projection
/// Financial projection for a district
///
/// Computes capacity factor, generation, revenue, ROI and payback from the
/// district's current wind reading. Query parameters override the default
/// project economics and select the estimation mode.
#[utoipa::path(
    get,
    path = "/api/districts/{id}/projection",
    params(
        ("id" = String, Path, description = "Unique district ID"),
        ProjectionQuery
    ),
    responses(
        (status = 200, description = "Financial projection", body = DistrictProjectionResponse),
        (status = 400, description = "Parameter out of range"),
        (status = 404, description = "District not found")
    )
)]
pub async fn get_district_projection(
    Path(id): Path<String>,
    Query(query): Query<ProjectionQuery>,
    State(config): State<Config>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let Some(district) = find_district(&config, &id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "District not found"})),
        )
            .into_response();
    };
    let params = query.parameters();
    if let Err(msg) = params.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": msg})),
        )
            .into_response();
    }

    let reading = reading_for(&state, district);
    let response = DistrictProjectionResponse {
        timestamp: chrono::Utc::now(),
        district_id: district.id.clone(),
        wind_source: reading.source,
        fallback_warning: reading.fallback_warning,
        projection: projection::compute(reading.wind_speed_ms, query.mode(), &params),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/projection
/// What-if projection for an explicit wind speed
///
/// Same calculation as the district endpoint, but takes the wind speed from
/// the query string instead of live data. Useful for exploring sites that
/// are not in the reference table.
#[utoipa::path(
    get,
    path = "/api/projection",
    params(ProjectionQuery),
    responses(
        (status = 200, description = "Financial projection", body = ProjectionResult),
        (status = 400, description = "Missing wind speed or parameter out of range")
    )
)]
pub async fn compute_projection(Query(query): Query<ProjectionQuery>) -> impl IntoResponse {
    let Some(wind_speed_ms) = query.wind_speed_ms else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "wind_speed_ms query parameter is required"})),
        )
            .into_response();
    };
    if !wind_speed_ms.is_finite() || wind_speed_ms < 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": format!("wind_speed_ms must be finite and non-negative, got {wind_speed_ms}")
            })),
        )
            .into_response();
    }
    let params = query.parameters();
    if let Err(msg) = params.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": msg})),
        )
            .into_response();
    }
    Json(projection::compute(wind_speed_ms, query.mode(), &params)).into_response()
}

/// GET /api/health
/// Service health and refresh summary
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthStatus)
    )
)]
pub async fn get_health(
    State(config): State<Config>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        districts_total: config.districts.len(),
        districts_realtime: state.realtime_count(),
        offline_mode: state.is_offline(),
    })
    .into_response()
}

/// GET /api/settings/offline-mode
/// Read the offline-mode flag
#[utoipa::path(
    get,
    path = "/api/settings/offline-mode",
    responses(
        (status = 200, description = "Current offline-mode setting", body = OfflineMode)
    )
)]
pub async fn get_offline_mode(State(state): State<AppState>) -> impl IntoResponse {
    Json(OfflineMode {
        offline: state.is_offline(),
    })
    .into_response()
}

/// POST /api/settings/offline-mode
/// Toggle offline mode at runtime
///
/// When offline, the background refresh serves baseline values without
/// touching the network.
#[utoipa::path(
    post,
    path = "/api/settings/offline-mode",
    request_body = OfflineMode,
    responses(
        (status = 200, description = "Updated offline-mode setting", body = OfflineMode)
    )
)]
pub async fn set_offline_mode(
    State(state): State<AppState>,
    Json(body): Json<OfflineMode>,
) -> impl IntoResponse {
    state.set_offline(body.offline);
    println!("[SETTINGS] offline_mode set to {}", body.offline);
    Json(OfflineMode {
        offline: state.is_offline(),
    })
    .into_response()
}
