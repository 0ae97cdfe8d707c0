use axum::{Router, routing::get};

use crate::controllers::wind_controller::{
    // Districts & readings
    list_districts, get_district_wind,
    // Projections
    get_district_projection, compute_projection,
    // Health & settings
    get_health, get_offline_mode, set_offline_mode,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>` — a single `.with_state(shared)` covers both.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/districts",                  get(list_districts))
        .route("/districts/{id}/wind",        get(get_district_wind))
        .route("/districts/{id}/projection",  get(get_district_projection))
        .route("/projection",                 get(compute_projection))
        .route("/health",                     get(get_health))
        .route("/settings/offline-mode",      get(get_offline_mode).post(set_offline_mode))
        .with_state(shared)
}
