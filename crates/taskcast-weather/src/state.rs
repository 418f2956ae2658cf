//! Observable fetch lifecycle: Idle -> Pending -> (Fulfilled | Rejected),
//! looping back to Pending on each scheduled tick.

use crate::types::WeatherSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

/// What the presentation layer sees.
///
/// Retention rules: entering `Pending` clears the error but keeps the last
/// snapshot; `Fulfilled` replaces the snapshot wholesale; `Rejected` records
/// the error while keeping any stale snapshot so the UI can choose what to
/// show.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherState {
    pub phase: Phase,
    pub data: Option<WeatherSnapshot>,
    pub error: Option<String>,
}

impl WeatherState {
    pub(crate) fn begin_fetch(&mut self) {
        self.phase = Phase::Pending;
        self.error = None;
    }

    pub(crate) fn resolve(&mut self, snapshot: WeatherSnapshot) {
        self.phase = Phase::Fulfilled;
        self.data = Some(snapshot);
        self.error = None;
    }

    pub(crate) fn reject(&mut self, message: String) {
        tracing::warn!("Weather fetch failed: {}", message);
        self.phase = Phase::Rejected;
        self.error = Some(message);
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Pending
    }
}
