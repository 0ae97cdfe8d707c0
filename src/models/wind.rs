use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ─── Current wind reading ────────────────────────────────────────────────────

/// Where the current wind figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WindSource {
    /// First hourly sample from the weather API.
    Realtime,
    /// Static long-term average from the district table.
    Baseline,
}

/// Latest wind figure for a district, realtime or fallen back to baseline.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WindReading {
    pub wind_speed_ms: f64,
    pub source: WindSource,
    /// Set when the realtime fetch failed and the baseline value was
    /// substituted. Not set when offline mode deliberately skips the fetch.
    pub fallback_warning: bool,
    pub last_error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DistrictWindResponse {
    pub timestamp: DateTime<Utc>,
    pub district_id: String,
    pub data: WindReading,
}

// ─── Feasibility tiers ───────────────────────────────────────────────────────

/// Coarse site classification shown on the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PotentialTier {
    High,
    Medium,
    Low,
}

impl PotentialTier {
    pub fn from_wind_speed(wind_speed_ms: f64) -> Self {
        if wind_speed_ms >= 6.0 {
            PotentialTier::High
        } else if wind_speed_ms >= 5.0 {
            PotentialTier::Medium
        } else {
            PotentialTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PotentialTier::High => "High",
            PotentialTier::Medium => "Medium",
            PotentialTier::Low => "Low",
        }
    }
}

// ─── Projection inputs ───────────────────────────────────────────────────────

/// How annual energy is estimated from the wind figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EstimationMode {
    /// Closed-form linear capacity-factor ratio (canonical).
    #[default]
    CapacityFactor,
    /// Tabulated turbine power curve averaged over simulated hourly wind.
    PowerCurve,
}

/// User-supplied project economics. Ranges are enforced at the HTTP
/// boundary via [`ProjectParameters::validate`], never inside the math.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct ProjectParameters {
    /// Project lifetime in years (1–25).
    pub years: u32,
    /// Turbine capacity in MW (0.5–10).
    pub capacity_mw: f64,
    /// Capital cost per MW installed.
    pub capital_cost_per_mw: f64,
    /// Operation & maintenance cost per MW per year.
    pub om_cost_per_mw_year: f64,
    /// Electricity tariff per kWh sold.
    pub tariff_per_kwh: f64,
}

impl Default for ProjectParameters {
    fn default() -> Self {
        Self {
            years: 10,
            capacity_mw: 2.0,
            capital_cost_per_mw: 650.0,
            om_cost_per_mw_year: 25.0,
            tariff_per_kwh: 4.5,
        }
    }
}

impl ProjectParameters {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=25).contains(&self.years) {
            return Err(format!("years must be within 1–25, got {}", self.years));
        }
        if !self.capacity_mw.is_finite() || !(0.5..=10.0).contains(&self.capacity_mw) {
            return Err(format!("capacity_mw must be within 0.5–10, got {}", self.capacity_mw));
        }
        if !self.capital_cost_per_mw.is_finite() || self.capital_cost_per_mw < 0.0 {
            return Err(format!(
                "capital_cost_per_mw must be finite and non-negative, got {}",
                self.capital_cost_per_mw
            ));
        }
        if !self.om_cost_per_mw_year.is_finite() || self.om_cost_per_mw_year < 0.0 {
            return Err(format!(
                "om_cost_per_mw_year must be finite and non-negative, got {}",
                self.om_cost_per_mw_year
            ));
        }
        if !self.tariff_per_kwh.is_finite() || self.tariff_per_kwh < 0.0 {
            return Err(format!(
                "tariff_per_kwh must be finite and non-negative, got {}",
                self.tariff_per_kwh
            ));
        }
        Ok(())
    }
}

/// Query string accepted by the projection endpoints. Every field is
/// optional; absent fields take the [`ProjectParameters`] defaults.
/// `wind_speed_ms` is only honored (and required) by the what-if endpoint —
/// the district endpoint always uses the district's current reading.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectionQuery {
    /// Mean wind speed in m/s (what-if endpoint only).
    pub wind_speed_ms: Option<f64>,
    pub mode: Option<EstimationMode>,
    pub years: Option<u32>,
    pub capacity_mw: Option<f64>,
    pub capital_cost_per_mw: Option<f64>,
    pub om_cost_per_mw_year: Option<f64>,
    pub tariff_per_kwh: Option<f64>,
}

impl ProjectionQuery {
    pub fn mode(&self) -> EstimationMode {
        self.mode.unwrap_or_default()
    }

    /// Merge supplied overrides into the defaults.
    pub fn parameters(&self) -> ProjectParameters {
        let defaults = ProjectParameters::default();
        ProjectParameters {
            years: self.years.unwrap_or(defaults.years),
            capacity_mw: self.capacity_mw.unwrap_or(defaults.capacity_mw),
            capital_cost_per_mw: self.capital_cost_per_mw.unwrap_or(defaults.capital_cost_per_mw),
            om_cost_per_mw_year: self.om_cost_per_mw_year.unwrap_or(defaults.om_cost_per_mw_year),
            tariff_per_kwh: self.tariff_per_kwh.unwrap_or(defaults.tariff_per_kwh),
        }
    }
}

// ─── Projection output ───────────────────────────────────────────────────────

/// Full financial projection for one wind figure + parameter set.
/// Recomputed fresh on every request; there is no cached state.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectionResult {
    pub wind_speed_ms: f64,
    pub mode: EstimationMode,
    /// Fraction of nameplate output actually produced, clamped to [0, 0.6].
    pub capacity_factor: f64,
    pub annual_generation_mwh: f64,
    pub total_investment: f64,
    pub annual_om_cost: f64,
    pub total_om_cost: f64,
    pub annual_revenue: f64,
    pub total_revenue: f64,
    pub annual_cash_flow: f64,
    pub net_profit: f64,
    /// Percent. `null` when the investment is zero (nothing to return on).
    pub roi_percent: Option<f64>,
    /// Years to recover the investment. `null` when annual cash flow ≤ 0.
    pub payback_years: Option<f64>,
    /// Cumulative generation per project year, for trend charts.
    pub cumulative_energy_mwh: Vec<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DistrictProjectionResponse {
    pub timestamp: DateTime<Utc>,
    pub district_id: String,
    pub wind_source: WindSource,
    pub fallback_warning: bool,
    pub projection: ProjectionResult,
}

// ─── Open-Meteo wire types ───────────────────────────────────────────────────

// Only the first element of `hourly.wind_speed_10m` is read; the rest of the
// payload is ignored.
#[derive(Debug, Deserialize)]
pub struct HourlyWindResponse {
    pub hourly: HourlyWind,
}

#[derive(Debug, Deserialize)]
pub struct HourlyWind {
    pub wind_speed_10m: Option<Vec<f64>>,
}

// ─── REST API response types ─────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub districts_total: usize,
    /// Districts whose latest reading came from the weather API.
    pub districts_realtime: usize,
    pub offline_mode: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OfflineMode {
    pub offline: bool,
}
