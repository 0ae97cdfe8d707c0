use std::time::Duration;

use chrono::Utc;

use crate::config::DistrictConfig;
use crate::models::wind::{HourlyWindResponse, WindReading, WindSource};

/// Single outbound call per refresh; no retry, no backoff.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

fn forecast_url(district: &DistrictConfig) -> String {
    match &district.realtime_url {
        Some(url) => url.clone(),
        None => format!(
            "https://api.open-meteo.com/v1/forecast?latitude={}&longitude={}&hourly=wind_speed_10m&wind_speed_unit=ms&forecast_days=1",
            district.latitude, district.longitude
        ),
    }
}

/// Current wind for a district.
///
/// Tries one GET against the weather API and reads the first hourly sample.
/// Any failure — timeout, non-2xx, malformed payload, missing field — falls
/// back to the district's baseline value with the warning flag set. Never
/// returns an error.
pub async fn get_current_wind(district: &DistrictConfig) -> WindReading {
    match fetch_realtime_wind(district).await {
        Ok(speed) => WindReading {
            wind_speed_ms: speed,
            source: WindSource::Realtime,
            fallback_warning: false,
            last_error: None,
            updated_at: Utc::now(),
        },
        Err(e) => {
            eprintln!(
                "[WIND] {}: realtime fetch failed ({}) — using baseline {} m/s",
                district.id, e, district.baseline_wind_ms
            );
            WindReading {
                fallback_warning: true,
                last_error: Some(e.to_string()),
                ..baseline_reading(district)
            }
        }
    }
}

async fn fetch_realtime_wind(
    district: &DistrictConfig,
) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let response = client
        .get(forecast_url(district))
        .send()
        .await?
        .error_for_status()?;
    let parsed = response.json::<HourlyWindResponse>().await?;

    let first = parsed
        .hourly
        .wind_speed_10m
        .as_deref()
        .and_then(|samples| samples.first().copied());

    match first {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(format!("unusable wind sample: {v}").into()),
        None => Err("hourly wind_speed_10m missing or empty".into()),
    }
}

/// Baseline-only reading — offline mode and the fetch-failure fallback.
pub fn baseline_reading(district: &DistrictConfig) -> WindReading {
    WindReading {
        wind_speed_ms: district.baseline_wind_ms,
        source: WindSource::Baseline,
        fallback_warning: false,
        last_error: None,
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district() -> DistrictConfig {
        DistrictConfig {
            id: "dewas".to_string(),
            name: "Dewas".to_string(),
            latitude: 22.9676,
            longitude: 76.0534,
            baseline_wind_ms: 5.5,
            source_name: "NIWE".to_string(),
            source_url: "https://niwe.res.in".to_string(),
            realtime_url: None,
        }
    }

    #[test]
    fn test_baseline_reading_mirrors_profile() {
        let r = baseline_reading(&district());
        assert_eq!(r.wind_speed_ms, 5.5);
        assert_eq!(r.source, WindSource::Baseline);
        assert!(!r.fallback_warning, "deliberate baseline reads carry no warning");
        assert!(r.last_error.is_none());
    }

    #[test]
    fn test_forecast_url_from_coordinates() {
        let url = forecast_url(&district());
        assert!(url.starts_with("https://api.open-meteo.com/v1/forecast?"));
        assert!(url.contains("latitude=22.9676"));
        assert!(url.contains("hourly=wind_speed_10m"));
        assert!(url.contains("wind_speed_unit=ms"), "samples must arrive in m/s");
    }

    #[test]
    fn test_forecast_url_override() {
        let mut d = district();
        d.realtime_url = Some("http://localhost:9999/wind".to_string());
        assert_eq!(forecast_url(&d), "http://localhost:9999/wind");
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_with_warning() {
        // Unroutable local endpoint: the request errors immediately and the
        // reading must degrade to baseline instead of surfacing an error.
        let mut d = district();
        d.realtime_url = Some("http://127.0.0.1:9/wind".to_string());
        let r = get_current_wind(&d).await;
        assert_eq!(r.wind_speed_ms, d.baseline_wind_ms);
        assert_eq!(r.source, WindSource::Baseline);
        assert!(r.fallback_warning, "failed fetch must set the warning flag");
        assert!(r.last_error.is_some());
    }
}
