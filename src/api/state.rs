//! Application state for the Xtrack API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::store::Store;

/// Shared application state.
///
/// Holds the loaded configuration and the store. Handlers take the store's
/// read lock for queries and its write lock for mutations, each for a single
/// operation.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
    /// Employees, leaves, holidays and attendance.
    store: Arc<RwLock<Store>>,
}

impl AppState {
    /// Creates a new application state whose directory is seeded from the
    /// configuration.
    pub fn new(config: ConfigLoader) -> Self {
        let store = Store::with_employees(config.config().seed_employees().iter().cloned());
        Self::with_store(config, store)
    }

    /// Creates a new application state around an existing store.
    pub fn with_store(config: ConfigLoader, store: Store) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared store.
    pub fn store(&self) -> &RwLock<Store> {
        &self.store
    }
}
