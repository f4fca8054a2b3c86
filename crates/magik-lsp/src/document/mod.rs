//! Open document model and notification handling.

pub mod lifecycle;
pub mod store;

pub use lifecycle::DocumentLifecycle;
pub use store::DocumentStore;
