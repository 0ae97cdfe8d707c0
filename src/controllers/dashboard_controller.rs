use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::config::Config;
use crate::models::wind::{EstimationMode, PotentialTier, ProjectParameters};
use crate::services::{projection, wind_service};
use crate::shared_state::AppState;

/// GET /
///
/// Server-rendered feasibility dashboard: one card per district with the
/// current wind figure and a projection under the default project
/// assumptions. The markup mirrors the static page this service replaces,
/// filled from live state instead of hard-coded numbers.
pub async fn dashboard(
    State(config): State<Config>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let params = ProjectParameters::default();

    let mut cards = String::new();
    for district in &config.districts {
        let reading = state
            .get_reading(&district.id)
            .unwrap_or_else(|| wind_service::baseline_reading(district));
        let tier = PotentialTier::from_wind_speed(reading.wind_speed_ms);
        let result = projection::compute(reading.wind_speed_ms, EstimationMode::CapacityFactor, &params);

        let tier_class = match tier {
            PotentialTier::High => "high",
            PotentialTier::Medium => "medium",
            PotentialTier::Low => "low",
        };
        let roi = result
            .roi_percent
            .map(|r| format!("{:.0}% over {} years", r, params.years))
            .unwrap_or_else(|| "—".to_string());
        let payback = result
            .payback_years
            .map(|p| format!("{p:.1} years"))
            .unwrap_or_else(|| "—".to_string());
        let source_note = if reading.fallback_warning {
            " <em>(baseline fallback — weather API unavailable)</em>"
        } else if state.is_offline() {
            " <em>(baseline — offline mode)</em>"
        } else {
            ""
        };

        cards.push_str(&format!(
            r#"            <div class="district {tier_class}">
                <h3>{name} District</h3>
                <p><strong>Wind Speed:</strong> {wind:.1} m/s{source_note}</p>
                <p><strong>Potential:</strong> {tier}</p>
                <p><strong>Capacity Factor:</strong> {cf:.0}%</p>
                <p><strong>Annual Generation:</strong> {gen:.0} MWh</p>
                <p><strong>ROI:</strong> {roi}</p>
                <p><strong>Payback:</strong> {payback}</p>
            </div>
"#,
            tier_class = tier_class,
            name = district.name,
            wind = reading.wind_speed_ms,
            source_note = source_note,
            tier = tier.label(),
            cf = result.capacity_factor * 100.0,
            gen = result.annual_generation_mwh,
            roi = roi,
            payback = payback,
        ));
    }

    let mut sources = String::new();
    for district in &config.districts {
        let entry = format!(
            r#"                <p><strong>{}:</strong> <a href="{}">{}</a> ({})</p>
"#,
            district.source_name, district.source_url, district.source_url, district.name
        );
        if !sources.contains(&entry) {
            sources.push_str(&entry);
        }
    }

    let page = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>MP Wind Energy Dashboard</title>
    <link rel="stylesheet" href="/dashboard.css">
</head>
<body>
    <div class="container">
        <h1>Madhya Pradesh Wind Energy Feasibility Dashboard</h1>
        <p class="subtitle">Central India wind assessment — {capacity} MW turbine, {years}-year horizon</p>

{cards}
        <div class="data-source">
            <h3>Data Sources</h3>
{sources}        </div>
    </div>
</body>
</html>
"#,
        capacity = params.capacity_mw,
        years = params.years,
        cards = cards,
        sources = sources,
    );

    Html(page).into_response()
}
