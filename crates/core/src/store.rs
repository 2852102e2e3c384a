//! The record store seam.
//!
//! The view layer persists through [`RecordStore`] and never talks HTTP
//! itself. `dinodex-store` provides the reqwest client for the remote
//! resource and an in-process implementation for development and tests.

use async_trait::async_trait;

use crate::error::RequestError;
use crate::model::{Dinosaur, NewDinosaur};

/// Whole-entity CRUD against a dinosaur collection.
///
/// Every method is a single request/response exchange. Implementations do
/// not retry and do not validate payloads.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create a record with no features and return it with its assigned id.
    async fn create(&self, input: &NewDinosaur) -> Result<Dinosaur, RequestError>;

    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<Dinosaur>, RequestError>;

    /// Fetch a single record.
    async fn get(&self, id: &str) -> Result<Dinosaur, RequestError>;

    /// Replace the record at `dinosaur.id` with the complete entity
    /// (scalars and the full feature sequence). Last writer wins.
    async fn update(&self, dinosaur: &Dinosaur) -> Result<Dinosaur, RequestError>;

    /// Delete a record together with its nested features.
    async fn delete(&self, id: &str) -> Result<(), RequestError>;
}
