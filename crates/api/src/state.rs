//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{DocumentStore, ProductRepository, SubscriberRepository};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; the store handle is injected so tests can
/// swap in the in-memory backend.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Create a new application state around a document store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    /// Product repository bound to this state's store.
    #[must_use]
    pub fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(self.store())
    }

    /// Subscriber repository bound to this state's store.
    #[must_use]
    pub fn subscribers(&self) -> SubscriberRepository<'_> {
        SubscriberRepository::new(self.store())
    }
}
