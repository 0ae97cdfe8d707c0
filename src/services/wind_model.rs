/// Deterministic hourly wind synthesis for central India.
///
/// Layers three effects on top of a site's long-term mean:
///  a) Seasonal swell — south-west monsoon peak around mid-July,
///     winter trough around mid-January
///  b) Diurnal cycle — afternoon maximum near 15:00 local
///  c) Day-to-day scatter — deterministic hash of site mean × day,
///     so identical inputs always reproduce the same series
///
/// No RNG anywhere; the series is a pure function of (mean, hour).

use std::f64::consts::PI;

pub const HOURS_PER_YEAR: usize = 8760;

/// Monsoon peak day-of-year (mid-July) for Madhya Pradesh.
const MONSOON_PEAK_DOY: f64 = 196.0;
/// Seasonal amplitude as a fraction of the mean.
const SEASONAL_AMPLITUDE: f64 = 0.25;
/// Diurnal amplitude as a fraction of the mean, peak at 15:00.
const DIURNAL_AMPLITUDE: f64 = 0.15;
const DIURNAL_PEAK_HOUR: f64 = 15.0;
/// Day-to-day scatter bound (±12%).
const DAILY_SCATTER: f64 = 0.12;

/// Wind speed (m/s) for one hour of a synthetic year.
/// `hour_of_year` is 0-based; values past 8759 wrap.
pub fn hourly_wind(mean_ms: f64, hour_of_year: usize) -> f64 {
    let hour = hour_of_year % HOURS_PER_YEAR;
    let doy = (hour / 24) as f64 + 1.0; // 1..=365
    let hod = (hour % 24) as f64;

    let seasonal = 1.0 + SEASONAL_AMPLITUDE * (2.0 * PI * (doy - MONSOON_PEAK_DOY) / 365.0).cos();
    let diurnal = 1.0 + DIURNAL_AMPLITUDE * (2.0 * PI * (hod - DIURNAL_PEAK_HOUR) / 24.0).cos();

    // Deterministic hash: changes every day, consistent for same site × day
    let seed = ((mean_ms * 100.0) as i64)
        .wrapping_mul(397)
        ^ (doy as i64).wrapping_mul(1013);
    let daily_noise = ((seed % 1000) as f64 / 1000.0 - 0.5) * 2.0; // [-1,1]
    let day_variation = 1.0 + daily_noise * DAILY_SCATTER;

    (mean_ms * seasonal * diurnal * day_variation).max(0.0)
}
