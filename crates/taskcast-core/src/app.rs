//! The owned application state object.
//!
//! All mutation flows through `App` methods; there is no ambient global
//! store. The presentation layer reads through the accessors and invokes
//! the operations below.

use std::sync::Arc;

use uuid::Uuid;

use taskcast_auth::{AuthState, AuthStore, User};
use taskcast_storage::{FileMirror, Mirror};
use taskcast_tasks::{Task, TaskDraft, TaskStore};
use taskcast_weather::{MockWeatherProvider, PollerHandle, WeatherPoller, WeatherSnapshot, WeatherState};

use crate::config::Config;
use crate::error::AppError;

/// An incomplete outdoor task paired with the current forecast, if any.
#[derive(Debug, Clone)]
pub struct OutdoorItem {
    pub task: Task,
    pub weather: Option<WeatherSnapshot>,
}

/// Application state and lifecycle manager
pub struct App {
    config: Config,
    auth: AuthStore,
    tasks: TaskStore,
    weather: Option<PollerHandle>,
}

impl App {
    /// Create an application backed by the file mirror under the configured
    /// data directory.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let mirror: Arc<dyn Mirror> = Arc::new(FileMirror::new(&config.data_dir)?);
        Ok(Self::with_mirror(config, mirror))
    }

    /// Create an application over an explicit mirror (tests use the
    /// in-memory one).
    pub fn with_mirror(config: Config, mirror: Arc<dyn Mirror>) -> Self {
        let auth = AuthStore::with_delays(
            mirror.clone(),
            config.login_delay(),
            config.logout_delay(),
        );
        let tasks = TaskStore::new(mirror);
        Self {
            config,
            auth,
            tasks,
            weather: None,
        }
    }

    /// Restore both stores from the mirror. Runs before first render.
    pub fn rehydrate(&mut self) {
        self.auth.rehydrate();
        self.tasks.rehydrate();
        tracing::info!(
            "Rehydrated state: {} task(s), authenticated={}",
            self.tasks.tasks().len(),
            self.auth.is_authenticated()
        );
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn auth_state(&self) -> &AuthState {
        self.auth.state()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    /// Simulated sign-in; any non-empty username succeeds.
    pub async fn login(&mut self, username: &str) -> Result<User, AppError> {
        Ok(self.auth.login(username).await?)
    }

    pub async fn logout(&mut self) -> Result<(), AppError> {
        Ok(self.auth.logout().await?)
    }

    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task, AppError> {
        Ok(self.tasks.add_task(draft)?.clone())
    }

    pub fn delete_task(&mut self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tasks.delete_task(id)?)
    }

    pub fn toggle_task(&mut self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tasks.toggle_task(id)?)
    }

    /// Start the background forecast refresh. No-op if already running.
    pub fn start_weather(&mut self) {
        if self.weather.is_some() {
            return;
        }
        let provider = MockWeatherProvider::new(
            self.config.weather.location_name.clone(),
            self.config.weather.country_code.clone(),
        );
        let poller = WeatherPoller::new(provider, self.config.refresh_interval());
        self.weather = Some(poller.start());
    }

    /// Current weather state; `None` until [`App::start_weather`] runs.
    pub fn weather_state(&self) -> Option<WeatherState> {
        self.weather.as_ref().map(|handle| handle.state())
    }

    /// Incomplete outdoor tasks annotated with the latest snapshot.
    pub fn outdoor_briefing(&self) -> Vec<OutdoorItem> {
        let snapshot = self
            .weather
            .as_ref()
            .and_then(|handle| handle.state().data);
        self.tasks
            .outdoor_pending()
            .map(|task| OutdoorItem {
                task: task.clone(),
                weather: snapshot.clone(),
            })
            .collect()
    }

    /// Stop the poller and wait for its loop to exit.
    pub async fn shutdown(&mut self) {
        tracing::info!("Shutting down application");
        if let Some(handle) = self.weather.take() {
            handle.stopped().await;
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use taskcast_storage::{MemoryMirror, MirrorExt};
    use taskcast_tasks::Priority;

    fn test_app() -> (Arc<MemoryMirror>, App) {
        let mirror = Arc::new(MemoryMirror::new());
        let config = Config {
            auth: crate::config::AuthConfig {
                login_delay_ms: 0,
                logout_delay_ms: 0,
            },
            ..Config::default()
        };
        let app = App::with_mirror(config, mirror.clone());
        (mirror, app)
    }

    #[tokio::test(start_paused = true)]
    async fn test_example_scenario_empty_storage_to_first_task() {
        let (mirror, mut app) = test_app();
        app.rehydrate();
        assert!(app.tasks().is_empty());

        let task = app
            .add_task(TaskDraft::new("Buy milk").priority(Priority::Low))
            .unwrap();

        assert_eq!(app.tasks().len(), 1);
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Low);

        let persisted: Vec<Task> = mirror.load("tasks").unwrap();
        assert_eq!(persisted, vec![task]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_logout_rehydrate_yields_anonymous() {
        let (mirror, mut app) = test_app();

        app.login("alice").await.unwrap();
        app.logout().await.unwrap();

        let mut fresh = App::with_mirror(Config::default(), mirror);
        fresh.rehydrate();
        assert_eq!(fresh.auth_state(), &AuthState::Anonymous);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_survives_restart() {
        let (mirror, mut app) = test_app();

        app.login("alice").await.unwrap();
        app.add_task(TaskDraft::new("Water plants").outdoor(true))
            .unwrap();

        let mut fresh = App::with_mirror(Config::default(), mirror);
        fresh.rehydrate();
        assert!(fresh.auth_state().is_authenticated());
        assert_eq!(fresh.tasks().len(), 1);
        assert_eq!(fresh.tasks()[0].title, "Water plants");
    }

    #[tokio::test(start_paused = true)]
    async fn test_outdoor_briefing_pairs_tasks_with_forecast() {
        let (_mirror, mut app) = test_app();

        app.add_task(TaskDraft::new("Mow lawn").outdoor(true)).unwrap();
        app.add_task(TaskDraft::new("Email accountant")).unwrap();

        // Before the poller starts there is no forecast to annotate with.
        let briefing = app.outdoor_briefing();
        assert_eq!(briefing.len(), 1);
        assert_eq!(briefing[0].task.title, "Mow lawn");
        assert!(briefing[0].weather.is_none());

        app.start_weather();
        // Paused time fast-forwards through the mock latency.
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;

        let briefing = app.outdoor_briefing();
        assert_eq!(briefing.len(), 1);
        assert!(briefing[0].weather.is_some());

        app.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_weather_state_none_until_started() {
        let (_mirror, mut app) = test_app();
        assert!(app.weather_state().is_none());

        app.start_weather();
        assert!(app.weather_state().is_some());
        app.shutdown().await;
    }
}
