use std::sync::Arc;

use dinodex_core::store::RecordStore;

use crate::config::ServerConfig;
use crate::sync::ViewSynchronizer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The record store the synchronizer persists through (also probed by `/health`).
    pub store: Arc<dyn RecordStore>,
    /// Owner of the displayed snapshot.
    pub sync: Arc<ViewSynchronizer>,
}

impl AppState {
    /// Build state around a store, with a fresh, empty view.
    pub fn new(config: ServerConfig, store: Arc<dyn RecordStore>) -> Self {
        Self {
            config: Arc::new(config),
            sync: Arc::new(ViewSynchronizer::new(Arc::clone(&store))),
            store,
        }
    }
}
