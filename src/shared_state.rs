use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use axum::extract::FromRef;

use crate::config::Config;
use crate::models::wind::{WindReading, WindSource};

#[derive(Clone)]
pub struct AppState {
    /// Map of district_id to latest wind reading
    readings: Arc<RwLock<HashMap<String, WindReading>>>,
    /// Offline mode flag — toggled at runtime via API
    offline_mode: Arc<AtomicBool>,
    started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(offline_mode_default: bool) -> Self {
        Self {
            readings: Arc::new(RwLock::new(HashMap::new())),
            offline_mode: Arc::new(AtomicBool::new(offline_mode_default)),
            started_at: Arc::new(Instant::now()),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline_mode.load(Ordering::Relaxed)
    }

    pub fn set_offline(&self, value: bool) {
        self.offline_mode.store(value, Ordering::Relaxed);
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn set_reading(&self, district_id: &str, reading: WindReading) {
        if let Ok(mut map) = self.readings.write() {
            #[cfg(feature = "verbose_log")]
            println!(
                "[STATE UPDATE] District: {} | Wind: {:.2} m/s | Source: {:?} | Warning: {}",
                district_id, reading.wind_speed_ms, reading.source, reading.fallback_warning
            );
            map.insert(district_id.to_string(), reading);
        }
    }

    pub fn get_reading(&self, district_id: &str) -> Option<WindReading> {
        self.readings
            .read()
            .ok()
            .and_then(|map| map.get(district_id).cloned())
    }

    pub fn get_all_readings(&self) -> HashMap<String, WindReading> {
        self.readings
            .read()
            .map(|map| map.clone())
            .unwrap_or_default()
    }

    /// Number of districts whose latest reading is live API data.
    pub fn realtime_count(&self) -> usize {
        self.readings
            .read()
            .map(|map| {
                map.values()
                    .filter(|r| r.source == WindSource::Realtime)
                    .count()
            })
            .unwrap_or(0)
    }
}

/// Combined handler state. Handlers extract `State<AppState>` and/or
/// `State<Config>` via `FromRef<SharedState>` — a single `.with_state(shared)`
/// covers both.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,
    pub state: AppState,
}

impl FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Config {
        shared.config.clone()
    }
}

impl FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> AppState {
        shared.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reading(speed: f64, source: WindSource) -> WindReading {
        WindReading {
            wind_speed_ms: speed,
            source,
            fallback_warning: false,
            last_error: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_set_and_get_reading() {
        let state = AppState::new(false);
        assert!(state.get_reading("ratlam").is_none());
        state.set_reading("ratlam", reading(6.2, WindSource::Realtime));
        let r = state.get_reading("ratlam").expect("reading stored");
        assert_eq!(r.wind_speed_ms, 6.2);
    }

    #[test]
    fn test_realtime_count() {
        let state = AppState::new(false);
        state.set_reading("ratlam", reading(6.2, WindSource::Realtime));
        state.set_reading("bhopal", reading(4.5, WindSource::Baseline));
        state.set_reading("dewas", reading(5.5, WindSource::Realtime));
        assert_eq!(state.realtime_count(), 2);
        assert_eq!(state.get_all_readings().len(), 3);
    }

    #[test]
    fn test_offline_toggle() {
        let state = AppState::new(true);
        assert!(state.is_offline());
        state.set_offline(false);
        assert!(!state.is_offline());
    }
}
