//! Weather service for TaskCast
//!
//! Provides a periodically refreshed forecast behind a provider trait. The
//! shipped provider is a mock (no network by design); a real HTTP provider
//! would slot behind the same pending/fulfilled/rejected contract.

pub mod poller;
pub mod provider;
pub mod state;
pub mod types;

pub use poller::{PollerHandle, WeatherPoller};
pub use provider::{MockWeatherProvider, WeatherProvider};
pub use state::{Phase, WeatherState};
pub use types::{WeatherError, WeatherSnapshot};
