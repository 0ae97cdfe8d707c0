/// ============================================================
///  Wind Financial Projection Engine
///
///  Calculation pipeline:
///   1. Capacity factor   – linear ratio against the 12 m/s reference
///                          site (0.35 at reference), clamped to the
///                          plausible physical band [0, 0.6]; or the
///                          tabulated power-curve average in
///                          `power_curve` mode
///   2. Annual generation – capacity × 8760 h × capacity factor
///   3. Economics         – investment, O&M, revenue, cash flow
///   4. Indicators        – net profit, ROI, payback period
///
///  Everything here is pure and deterministic: identical inputs give
///  bit-identical results. Zero-division cases surface as `None`
///  indicators, never as a panic.
/// ============================================================

use crate::models::wind::{EstimationMode, ProjectParameters, ProjectionResult};
use crate::services::{power_curve, wind_model};

// ─── Reference site constants ────────────────────────────────
/// Capacity factor achieved at the reference wind speed.
pub const REFERENCE_CAPACITY_FACTOR: f64 = 0.35;
/// Wind speed (m/s) at which the reference capacity factor holds.
pub const REFERENCE_WIND_SPEED_MS: f64 = 12.0;
/// Physical ceiling for onshore capacity factor.
pub const MAX_CAPACITY_FACTOR: f64 = 0.6;
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Capacity factor from mean wind speed — crude linear proxy for a
/// turbine power curve, bounded to the plausible range.
pub fn capacity_factor(wind_speed_ms: f64) -> f64 {
    let v = if wind_speed_ms.is_finite() { wind_speed_ms.max(0.0) } else { 0.0 };
    (REFERENCE_CAPACITY_FACTOR * (v / REFERENCE_WIND_SPEED_MS)).clamp(0.0, MAX_CAPACITY_FACTOR)
}

/// Main entry point.
///
/// * `wind_speed_ms` – mean wind speed at the site (m/s)
/// * `mode`          – closed-form ratio (canonical) or power-curve average
/// * `params`        – validated project economics
pub fn compute(
    wind_speed_ms: f64,
    mode: EstimationMode,
    params: &ProjectParameters,
) -> ProjectionResult {
    let cf = match mode {
        EstimationMode::CapacityFactor => capacity_factor(wind_speed_ms),
        EstimationMode::PowerCurve => power_curve_capacity_factor(wind_speed_ms),
    };

    let years = params.years as f64;
    let annual_generation_mwh = params.capacity_mw * HOURS_PER_YEAR * cf;

    let total_investment = params.capacity_mw * params.capital_cost_per_mw;
    let annual_om_cost = params.capacity_mw * params.om_cost_per_mw_year;
    let total_om_cost = annual_om_cost * years;

    // Tariff is per kWh, generation is in MWh.
    let annual_revenue = annual_generation_mwh * 1000.0 * params.tariff_per_kwh;
    let total_revenue = annual_revenue * years;

    let annual_cash_flow = annual_revenue - annual_om_cost;
    let net_profit = total_revenue - total_om_cost - total_investment;

    let roi_percent = if total_investment > 0.0 {
        let roi = 100.0 * net_profit / total_investment;
        roi.is_finite().then_some(roi)
    } else {
        None
    };

    let payback_years = if annual_cash_flow > 0.0 {
        let payback = total_investment / annual_cash_flow;
        payback.is_finite().then_some(payback)
    } else {
        None
    };

    let cumulative_energy_mwh = (1..=params.years)
        .map(|y| annual_generation_mwh * y as f64)
        .collect();

    ProjectionResult {
        wind_speed_ms,
        mode,
        capacity_factor: cf,
        annual_generation_mwh,
        total_investment,
        annual_om_cost,
        total_om_cost,
        annual_revenue,
        total_revenue,
        annual_cash_flow,
        net_profit,
        roi_percent,
        payback_years,
        cumulative_energy_mwh,
    }
}

/// Alternate estimation mode: average the tabulated power curve over one
/// simulated year of hourly wind, then clamp the implied capacity factor
/// to the same band as the closed-form path so downstream invariants hold.
fn power_curve_capacity_factor(mean_wind_ms: f64) -> f64 {
    let mean = if mean_wind_ms.is_finite() { mean_wind_ms.max(0.0) } else { 0.0 };
    let mut sum = 0.0;
    for hour in 0..wind_model::HOURS_PER_YEAR {
        let v = wind_model::hourly_wind(mean, hour);
        sum += power_curve::output_fraction(v);
    }
    (sum / wind_model::HOURS_PER_YEAR as f64).clamp(0.0, MAX_CAPACITY_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_params() -> ProjectParameters {
        ProjectParameters {
            years: 10,
            capacity_mw: 2.0,
            capital_cost_per_mw: 650.0,
            om_cost_per_mw_year: 25.0,
            tariff_per_kwh: 4.5,
        }
    }

    #[test]
    fn test_reference_site_exact() {
        // 12 m/s, 2 MW, 10 years — the canonical worked example.
        let r = compute(12.0, EstimationMode::CapacityFactor, &reference_params());
        assert_eq!(r.capacity_factor, 0.35, "reference site capacity factor");
        assert_eq!(r.annual_generation_mwh, 2.0 * 8760.0 * 0.35, "annual generation must be 6132 MWh");
        assert_eq!(r.total_investment, 1300.0);
        assert_eq!(r.annual_om_cost, 50.0);
        assert!(r.roi_percent.is_some());
        assert!(r.payback_years.is_some());
        println!(
            "Reference site: cf={:.2} gen={:.0} MWh roi={:.1}% payback={:.2}y",
            r.capacity_factor,
            r.annual_generation_mwh,
            r.roi_percent.unwrap(),
            r.payback_years.unwrap()
        );
    }

    #[test]
    fn test_capacity_factor_bounds_and_monotonicity() {
        let mut prev = -1.0;
        for i in 0..300 {
            let v = i as f64 * 0.1; // 0 .. 30 m/s
            let cf = capacity_factor(v);
            assert!(
                (0.0..=MAX_CAPACITY_FACTOR).contains(&cf),
                "cf out of [0, 0.6] at v={v}: {cf}"
            );
            assert!(cf >= prev, "cf must be non-decreasing, broke at v={v}");
            prev = cf;
        }
        // Clamp engages above ~20.57 m/s
        assert_eq!(capacity_factor(30.0), MAX_CAPACITY_FACTOR);
    }

    #[test]
    fn test_capacity_factor_degenerate_inputs() {
        assert_eq!(capacity_factor(0.0), 0.0);
        assert_eq!(capacity_factor(-4.0), 0.0, "negative wind clamps to zero");
        assert_eq!(capacity_factor(f64::NAN), 0.0, "NaN wind must not propagate");
        assert_eq!(capacity_factor(f64::INFINITY), MAX_CAPACITY_FACTOR);
    }

    #[test]
    fn test_zero_investment_means_undefined_roi() {
        let mut p = reference_params();
        p.capital_cost_per_mw = 0.0;
        let r = compute(6.0, EstimationMode::CapacityFactor, &p);
        assert!(r.roi_percent.is_none(), "ROI on zero investment is undefined, not a crash");
        // Payback of a free project is immediate.
        assert_eq!(r.payback_years, Some(0.0));
    }

    #[test]
    fn test_non_positive_cash_flow_means_undefined_payback() {
        // Zero tariff: revenue 0, cash flow negative.
        let mut p = reference_params();
        p.tariff_per_kwh = 0.0;
        let r = compute(6.0, EstimationMode::CapacityFactor, &p);
        assert!(r.annual_cash_flow <= 0.0);
        assert!(r.payback_years.is_none(), "payback on non-positive cash flow is undefined");
        assert!(r.net_profit < 0.0);
    }

    #[test]
    fn test_zero_wind_zero_generation() {
        let r = compute(0.0, EstimationMode::CapacityFactor, &reference_params());
        assert_eq!(r.annual_generation_mwh, 0.0);
        assert_eq!(r.annual_revenue, 0.0);
        assert!(r.payback_years.is_none());
    }

    #[test]
    fn test_deterministic_recompute() {
        let p = reference_params();
        let a = compute(5.7, EstimationMode::CapacityFactor, &p);
        let b = compute(5.7, EstimationMode::CapacityFactor, &p);
        assert_eq!(a.annual_generation_mwh.to_bits(), b.annual_generation_mwh.to_bits());
        assert_eq!(a.net_profit.to_bits(), b.net_profit.to_bits());
        assert_eq!(a.roi_percent, b.roi_percent);

        let c = compute(5.7, EstimationMode::PowerCurve, &p);
        let d = compute(5.7, EstimationMode::PowerCurve, &p);
        assert_eq!(
            c.capacity_factor.to_bits(),
            d.capacity_factor.to_bits(),
            "power-curve mode must be bit-identical across runs"
        );
    }

    #[test]
    fn test_cumulative_energy_trend() {
        let r = compute(12.0, EstimationMode::CapacityFactor, &reference_params());
        assert_eq!(r.cumulative_energy_mwh.len(), 10);
        assert_eq!(r.cumulative_energy_mwh[0], r.annual_generation_mwh);
        assert_eq!(r.cumulative_energy_mwh[9], r.annual_generation_mwh * 10.0);
    }

    #[test]
    fn test_power_curve_mode_within_bounds() {
        for v in [0.0, 2.0, 4.0, 6.0, 8.0, 12.0, 20.0] {
            let r = compute(v, EstimationMode::PowerCurve, &reference_params());
            assert!(
                (0.0..=MAX_CAPACITY_FACTOR).contains(&r.capacity_factor),
                "power-curve cf out of band at v={v}: {}",
                r.capacity_factor
            );
        }
        // Calm site produces essentially nothing.
        let calm = compute(1.0, EstimationMode::PowerCurve, &reference_params());
        assert!(calm.capacity_factor < 0.02, "calm site cf should be near zero");
    }
}
