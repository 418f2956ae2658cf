use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One complete forecast reading.
///
/// Ephemeral: lives only in memory and is replaced wholesale on each
/// successful fetch, never merged or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub humidity_pct: u8,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Coarse condition, e.g. "Clear", "Clouds", "Rain".
    pub condition_main: String,
    /// Human-readable variant, e.g. "scattered clouds".
    pub condition_description: String,
    pub location_name: String,
    pub country_code: String,
    pub fetched_at: DateTime<Utc>,
}

/// Weather fetch errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WeatherError {
    #[error("weather provider error: {0}")]
    Provider(String),
}
