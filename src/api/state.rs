//! Application state for the Rate Calculation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::store::RatePolicyStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// namely the rate policy store.
#[derive(Clone)]
pub struct AppState {
    /// The rate policy store.
    store: Arc<RatePolicyStore>,
}

impl AppState {
    /// Creates a new application state with the given policy store.
    pub fn new(store: RatePolicyStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the policy store.
    pub fn store(&self) -> &RatePolicyStore {
        &self.store
    }
}
