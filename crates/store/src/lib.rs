//! Record store backends for Dinodex.
//!
//! [`api::RecordStoreClient`] speaks JSON over HTTP to a remote CRUD
//! resource (crudcrud or mockapi style, see [`flavor::StoreFlavor`]).
//! [`memory::InMemoryStore`] keeps records in process for local runs and
//! tests. [`connect`] picks one from a [`config::StoreConfig`].

pub mod api;
pub mod config;
pub mod flavor;
pub mod memory;

use std::sync::Arc;

use dinodex_core::error::RequestError;
use dinodex_core::store::RecordStore;

use crate::config::{StoreBackend, StoreConfig};

/// Build the record store selected by `config`.
pub fn connect(config: &StoreConfig) -> Result<Arc<dyn RecordStore>, RequestError> {
    match &config.backend {
        StoreBackend::Remote { base_url, flavor } => {
            tracing::info!(%base_url, %flavor, "Using remote record store");
            let client = api::RecordStoreClient::from_config(base_url.clone(), *flavor, config.timeout)?;
            Ok(Arc::new(client))
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory record store");
            Ok(Arc::new(memory::InMemoryStore::new()))
        }
    }
}
