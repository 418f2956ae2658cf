//! Task model and the insertion-ordered task store.

pub mod store;
pub mod types;

pub use store::{TaskError, TaskStore};
pub use types::{Priority, Task, TaskDraft};
