use utoipa::OpenApi;

use crate::config;
use crate::controllers::wind_controller;
use crate::models::wind;

#[derive(OpenApi)]
#[openapi(
    paths(
        wind_controller::list_districts,
        wind_controller::get_district_wind,
        wind_controller::get_district_projection,
        wind_controller::compute_projection,
        wind_controller::get_health,
        wind_controller::get_offline_mode,
        wind_controller::set_offline_mode
    ),
    components(
        schemas(
            config::DistrictConfig,
            wind::WindSource,
            wind::WindReading,
            wind::DistrictWindResponse,
            wind::EstimationMode,
            wind::ProjectParameters,
            wind::ProjectionResult,
            wind::DistrictProjectionResponse,
            wind::HealthStatus,
            wind::OfflineMode
        )
    ),
    tags(
        (name = "wind-energy-sim", description = "Wind Energy Feasibility API")
    )
)]
pub struct ApiDoc;
