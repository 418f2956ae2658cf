//! Centralized error types for TaskCast.
//!
//! Every failure class degrades to a safe default (empty collection,
//! anonymous state, stale or absent weather); nothing here is fatal. This
//! module provides the typed hierarchy plus `user_message()` strings
//! suitable for UI display.

use thiserror::Error;

use taskcast_auth::AuthError;
use taskcast_storage::StorageError;
use taskcast_tasks::TaskError;
use taskcast_weather::WeatherError;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "Failed to save your data. Please try again.",
            AppError::Auth(AuthError::EmptyUsername) => "Please enter a username.",
            AppError::Auth(_) => "Sign-in failed. Please try again.",
            AppError::Task(TaskError::EmptyTitle) => "Please enter a task title.",
            AppError::Task(_) => "The task operation failed. Please try again.",
            AppError::Weather(_) => "Weather data unavailable right now.",
            AppError::Config(_) => "Invalid configuration. Using defaults.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("config parse error: {0}")]
    Parse(String),
}
