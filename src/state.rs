// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    config::Config,
    storage::{DocumentStore, StoreError},
};

/// Shared application context handed to every handler.
///
/// `store` is `None` when no `MONGODB_URI` was configured; the service then
/// runs with the proxy and health routes only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    pub fn new(config: Config, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// The configured store, or [`StoreError::NotConfigured`].
    pub fn store(&self) -> Result<&Arc<dyn DocumentStore>, StoreError> {
        self.store.as_ref().ok_or(StoreError::NotConfigured)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default(), None)
    }
}
