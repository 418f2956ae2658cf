//! Persistent key-value mirror for TaskCast.
//!
//! Every mutating store operation writes its full state snapshot through a
//! [`Mirror`] so that rehydration after restart reproduces the last
//! persisted state. Values are JSON text under string keys; malformed or
//! missing values load as absent, never as errors.

pub mod file;
pub mod memory;
pub mod mirror;

pub use file::FileMirror;
pub use memory::MemoryMirror;
pub use mirror::{Mirror, MirrorExt, StorageError};
