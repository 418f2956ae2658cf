use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted key-value mirror
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Simulated-auth settings
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Refresh interval in minutes
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u32,

    /// Location shown on the mocked forecast
    #[serde(default = "default_location_name")]
    pub location_name: String,

    #[serde(default = "default_country_code")]
    pub country_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Cosmetic login latency in milliseconds
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    /// Cosmetic logout latency in milliseconds
    #[serde(default = "default_logout_delay_ms")]
    pub logout_delay_ms: u64,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskcast")
}

fn default_refresh_minutes() -> u32 {
    30
}

fn default_location_name() -> String {
    "New York".to_string()
}

fn default_country_code() -> String {
    "US".to_string()
}

fn default_login_delay_ms() -> u64 {
    800
}

fn default_logout_delay_ms() -> u64 {
    500
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            refresh_minutes: default_refresh_minutes(),
            location_name: default_location_name(),
            country_code: default_country_code(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: default_login_delay_ms(),
            logout_delay_ms: default_logout_delay_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            weather: WeatherConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    /// Load from the standard config path, degrading to defaults.
    ///
    /// A missing file is normal; a malformed one is logged and replaced by
    /// defaults, matching the soft-fail posture of persisted state.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse a config file at an explicit path.
    pub fn from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn config_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("taskcast").join("config.toml"))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.weather.refresh_minutes) * 60)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.auth.login_delay_ms)
    }

    pub fn logout_delay(&self) -> Duration {
        Duration::from_millis(self.auth.logout_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.weather.refresh_minutes, 30);
        assert_eq!(config.auth.login_delay_ms, 800);
        assert_eq!(config.auth.logout_delay_ms, 500);
        assert_eq!(config.refresh_interval(), Duration::from_secs(1800));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [weather]
            refresh_minutes = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.weather.refresh_minutes, 5);
        assert_eq!(config.weather.location_name, "New York");
        assert_eq!(config.auth.login_delay_ms, 800);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [valid toml").unwrap();

        assert!(Config::from_path(&path).is_err());
    }
}
