//! The fetch seam and the mock provider behind it.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;

use crate::types::{WeatherError, WeatherSnapshot};

/// Source of forecast data.
///
/// The poller drives any implementation through the same
/// pending/fulfilled/rejected lifecycle; swapping in a real HTTP client
/// means implementing this trait and nothing else.
pub trait WeatherProvider: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<WeatherSnapshot, WeatherError>> + Send;
}

const CONDITIONS: [(&str, &str); 3] = [
    ("Clear", "clear sky"),
    ("Clouds", "scattered clouds"),
    ("Rain", "light rain"),
];

const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

/// Fabricates plausible forecast data after a short simulated latency.
///
/// Temperature 15-30 C, humidity 50-80 %, wind 1-6 m/s, condition drawn
/// from clear/clouds/rain. Never fails.
#[derive(Debug, Clone)]
pub struct MockWeatherProvider {
    latency: Duration,
    location_name: String,
    country_code: String,
}

impl MockWeatherProvider {
    pub fn new(location_name: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            location_name: location_name.into(),
            country_code: country_code.into(),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn generate(&self) -> WeatherSnapshot {
        let mut rng = rand::thread_rng();
        let (main, description) = CONDITIONS[rng.gen_range(0..CONDITIONS.len())];

        WeatherSnapshot {
            temperature_c: rng.gen_range(15..30) as f64,
            humidity_pct: rng.gen_range(50..80),
            wind_speed: (rng.gen_range(1.0..6.0) * 10.0_f64).round() / 10.0,
            condition_main: main.to_string(),
            condition_description: description.to_string(),
            location_name: self.location_name.clone(),
            country_code: self.country_code.clone(),
            fetched_at: Utc::now(),
        }
    }
}

impl Default for MockWeatherProvider {
    fn default() -> Self {
        Self::new("New York", "US")
    }
}

impl WeatherProvider for MockWeatherProvider {
    fn fetch(&self) -> impl Future<Output = Result<WeatherSnapshot, WeatherError>> + Send {
        async move {
            tokio::time::sleep(self.latency).await;
            Ok(self.generate())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_mock_values_stay_in_range() {
        let provider = MockWeatherProvider::default();

        for _ in 0..20 {
            let snap = provider.fetch().await.unwrap();
            assert!((15.0..30.0).contains(&snap.temperature_c));
            assert!((50..80).contains(&snap.humidity_pct));
            assert!((1.0..6.1).contains(&snap.wind_speed));
            assert!(CONDITIONS.iter().any(|(m, d)| {
                *m == snap.condition_main && *d == snap.condition_description
            }));
            assert_eq!(snap.location_name, "New York");
            assert_eq!(snap.country_code, "US");
        }
    }
}
