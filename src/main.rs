mod routes;
mod controllers;
mod services;
mod models;
mod api_docs;
mod shared_state;
mod config;

use std::net::SocketAddr;
use std::time::Duration;

use axum::{Router, response::Html, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::controllers::dashboard_controller::dashboard;
use crate::routes::wind_routes::api_routes;
use crate::services::wind_service;
use crate::shared_state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    // 1. Load configuration
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config.json: {}", e);
            return;
        }
    };
    println!("Configuration loaded: {} districts", config.districts.len());

    // 2. Initialize shared state
    let state = AppState::new(config.offline_mode);
    let shared = SharedState {
        config: config.clone(),
        state: state.clone(),
    };

    // 3. Start background refresh for each district
    let refresh_interval = Duration::from_secs(config.refresh_interval_s.max(1));
    for district in &config.districts {
        let state_clone = state.clone();
        let district_config = district.clone();

        tokio::spawn(async move {
            loop {
                let reading = if state_clone.is_offline() {
                    wind_service::baseline_reading(&district_config)
                } else {
                    wind_service::get_current_wind(&district_config).await
                };
                println!(
                    "[UPDATE] District: {} | Wind: {:.2} m/s | Source: {:?}{}",
                    district_config.id,
                    reading.wind_speed_ms,
                    reading.source,
                    if reading.fallback_warning { " | FALLBACK" } else { "" }
                );
                state_clone.set_reading(&district_config.id, reading);
                tokio::time::sleep(refresh_interval).await;
            }
        });
    }

    // 4. Start Axum HTTP server
    let server_port = config.resolved_port();
    let app = Router::new()
        .route("/", get(dashboard).with_state(shared.clone()))
        .nest("/api", api_routes(shared))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new("static"))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    println!("API Server listening on http://{}", addr);
    println!("Dashboard: http://{}/", addr);
    println!("Scalar UI: http://{}/scalar", addr);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
