//! Simulated authentication for TaskCast.
//!
//! Login is a pure acceptance operation: any non-empty username succeeds
//! after a cosmetic delay, and no password is validated or retained. This is
//! an explicit simplification, not a security boundary.

pub mod store;
pub mod types;

pub use store::AuthStore;
pub use types::{AuthError, AuthState, User};
