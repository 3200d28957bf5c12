//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Repeating timers (`setInterval` on web)
//! - DOM lookup and navigation

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod timer;

pub use storage::{KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
#[cfg(target_arch = "wasm32")]
pub use timer::Interval;
