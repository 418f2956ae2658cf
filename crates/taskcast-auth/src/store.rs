//! The two-state auth machine, mirrored under two independent keys.

use std::sync::Arc;
use std::time::Duration;

use taskcast_storage::{Mirror, MirrorExt};

use crate::types::{AuthError, AuthState, User};

/// Storage key for the authenticated flag.
pub const AUTH_FLAG_KEY: &str = "isAuthenticated";
/// Storage key for the user record.
pub const USER_KEY: &str = "user";

// Cosmetic latencies matching the simulated round trips in the UI.
const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(800);
const DEFAULT_LOGOUT_DELAY: Duration = Duration::from_millis(500);

/// Owns the auth state and its persisted mirror.
///
/// The flag and the user record are written as two independent keys; there
/// is no cross-key transaction, which is acceptable since both are written
/// from the single logical thread of control.
pub struct AuthStore {
    state: AuthState,
    mirror: Arc<dyn Mirror>,
    login_delay: Duration,
    logout_delay: Duration,
}

impl AuthStore {
    pub fn new(mirror: Arc<dyn Mirror>) -> Self {
        Self::with_delays(mirror, DEFAULT_LOGIN_DELAY, DEFAULT_LOGOUT_DELAY)
    }

    pub fn with_delays(
        mirror: Arc<dyn Mirror>,
        login_delay: Duration,
        logout_delay: Duration,
    ) -> Self {
        Self {
            state: AuthState::Anonymous,
            mirror,
            login_delay,
            logout_delay,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user()
    }

    /// Accept any non-empty username and enter `Authenticated`.
    ///
    /// Persists the user record and the flag, then updates in-memory state.
    /// The delay is purely cosmetic; no credentials are verified.
    pub async fn login(&mut self, username: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }

        tokio::time::sleep(self.login_delay).await;

        let user = User {
            username: username.to_string(),
        };
        self.mirror.save(USER_KEY, &user)?;
        self.mirror.save(AUTH_FLAG_KEY, &true)?;

        tracing::info!("User {:?} logged in", user.username);
        self.state = AuthState::Authenticated(user.clone());
        Ok(user)
    }

    /// Return to `Anonymous` from any state and remove both persisted keys.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        tokio::time::sleep(self.logout_delay).await;

        self.mirror.remove(USER_KEY)?;
        self.mirror.remove(AUTH_FLAG_KEY)?;

        tracing::info!("User logged out");
        self.state = AuthState::Anonymous;
        Ok(())
    }

    /// Restore state from the mirror.
    ///
    /// Enters `Authenticated` only when the flag is `true` and the user
    /// record parses; any other combination (flag absent or false, user
    /// missing or malformed) yields `Anonymous`. Idempotent and read-only
    /// with respect to the mirror.
    pub fn rehydrate(&mut self) {
        let flagged = self.mirror.load::<bool>(AUTH_FLAG_KEY).unwrap_or(false);
        let user = self.mirror.load::<User>(USER_KEY);

        self.state = match (flagged, user) {
            (true, Some(user)) => {
                tracing::debug!("Rehydrated session for {:?}", user.username);
                AuthState::Authenticated(user)
            }
            _ => AuthState::Anonymous,
        };
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use taskcast_storage::MemoryMirror;

    fn store_with_mirror() -> (Arc<MemoryMirror>, AuthStore) {
        let mirror = Arc::new(MemoryMirror::new());
        let store = AuthStore::new(mirror.clone());
        (mirror, store)
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_persists_both_keys() {
        let (mirror, mut store) = store_with_mirror();

        let user = store.login("alice").await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(store.is_authenticated());

        assert_eq!(mirror.load::<bool>(AUTH_FLAG_KEY), Some(true));
        assert_eq!(mirror.load::<User>(USER_KEY), Some(user));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_trims_username() {
        let (_mirror, mut store) = store_with_mirror();

        let user = store.login("  bob  ").await.unwrap();
        assert_eq!(user.username, "bob");
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_rejects_empty_username() {
        let (mirror, mut store) = store_with_mirror();

        assert!(matches!(
            store.login("   ").await,
            Err(AuthError::EmptyUsername)
        ));
        assert!(!store.is_authenticated());
        assert!(mirror.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_removal_is_durable() {
        let (mirror, mut store) = store_with_mirror();

        store.login("alice").await.unwrap();
        store.logout().await.unwrap();
        assert!(!store.is_authenticated());

        let mut reloaded = AuthStore::new(mirror);
        reloaded.rehydrate();
        assert_eq!(reloaded.state(), &AuthState::Anonymous);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rehydrate_restores_session() {
        let (mirror, mut store) = store_with_mirror();
        store.login("carol").await.unwrap();

        let mut reloaded = AuthStore::new(mirror);
        reloaded.rehydrate();
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.user().unwrap().username, "carol");
    }

    #[test]
    fn test_rehydrate_flag_without_user_stays_anonymous() {
        let (mirror, mut store) = store_with_mirror();

        mirror.save(AUTH_FLAG_KEY, &true).unwrap();
        store.rehydrate();
        assert_eq!(store.state(), &AuthState::Anonymous);
    }

    #[test]
    fn test_rehydrate_malformed_user_stays_anonymous() {
        let (mirror, mut store) = store_with_mirror();

        mirror.save(AUTH_FLAG_KEY, &true).unwrap();
        mirror.save_raw(USER_KEY, "{\"username\": 42").unwrap();
        store.rehydrate();
        assert_eq!(store.state(), &AuthState::Anonymous);
    }

    #[test]
    fn test_rehydrate_is_idempotent_and_read_only() {
        let (mirror, mut store) = store_with_mirror();
        mirror.save(AUTH_FLAG_KEY, &true).unwrap();
        mirror
            .save(
                USER_KEY,
                &User {
                    username: "dave".to_string(),
                },
            )
            .unwrap();

        store.rehydrate();
        store.rehydrate();
        assert!(store.is_authenticated());
        // Exactly the two planted keys, nothing written back.
        assert_eq!(mirror.len(), 2);
    }
}
