use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_port() -> u16 { 8000 }
fn default_offline_mode() -> bool { false }
fn default_refresh_interval_s() -> u64 { 60 }

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default = "default_offline_mode")]
    pub offline_mode: bool,
    /// Seconds between wind refreshes per district.
    #[serde(default = "default_refresh_interval_s")]
    pub refresh_interval_s: u64,
    pub districts: Vec<DistrictConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, ToSchema)]
pub struct DistrictConfig {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Long-term average wind speed (m/s) — used whenever the realtime
    /// fetch fails or offline mode is active.
    pub baseline_wind_ms: f64,
    pub source_name: String,
    pub source_url: String,
    /// Full weather-API URL override. When absent the Open-Meteo forecast
    /// endpoint is built from latitude/longitude.
    #[serde(default)]
    pub realtime_url: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Port resolution: the PORT environment variable wins over config.json.
    pub fn resolved_port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let raw = r#"{
            "server": { "port": 5000 },
            "districts": [
                {
                    "id": "ratlam",
                    "name": "Ratlam",
                    "latitude": 23.3342,
                    "longitude": 75.0370,
                    "baseline_wind_ms": 6.2,
                    "source_name": "NIWE",
                    "source_url": "https://niwe.res.in"
                }
            ]
        }"#;
        let cfg: Config = serde_json::from_str(raw).expect("config should parse");
        assert_eq!(cfg.server.port, 5000);
        assert!(!cfg.offline_mode, "offline_mode should default to false");
        assert_eq!(cfg.refresh_interval_s, 60, "refresh interval should default to 60s");
        assert_eq!(cfg.districts.len(), 1);
        assert_eq!(cfg.districts[0].id, "ratlam");
        assert!(cfg.districts[0].realtime_url.is_none());
    }

    #[test]
    fn test_port_defaults_to_8000() {
        let raw = r#"{ "server": {}, "districts": [] }"#;
        let cfg: Config = serde_json::from_str(raw).expect("config should parse");
        assert_eq!(cfg.server.port, 8000);
    }
}
