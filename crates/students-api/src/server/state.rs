//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Environment;
use crate::storage::{MemoryStorage, Storage};

/// Application state shared across all request handlers.
///
/// Cloned per request by Axum; the storage handle is `Arc`-backed so clones
/// are cheap and share one backend.
#[derive(Clone)]
pub struct AppState {
    /// Backend that owns every student record.
    pub storage: Arc<dyn Storage>,
    /// Environment reported by the health endpoint.
    pub env: Environment,
}

impl AppState {
    /// Create a new [`AppState`] around the given backend.
    pub fn new(storage: Arc<dyn Storage>, env: Environment) -> Self {
        Self { storage, env }
    }
}

impl Default for AppState {
    /// Creates an [`AppState`] over an empty in-memory store, suitable for tests.
    fn default() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), Environment::default())
    }
}
