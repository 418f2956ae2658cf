use serde::{Deserialize, Serialize};
use thiserror::Error;

use taskcast_storage::StorageError;

/// The signed-in user. Exists only while authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

/// Authentication state. The "authenticated iff user present" invariant
/// holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(user) => Some(user),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_state_accessors() {
        let anon = AuthState::Anonymous;
        assert!(!anon.is_authenticated());
        assert!(anon.user().is_none());

        let user = User {
            username: "alice".to_string(),
        };
        let authed = AuthState::Authenticated(user.clone());
        assert!(authed.is_authenticated());
        assert_eq!(authed.user(), Some(&user));
    }
}
