//! Dinodex domain layer.
//!
//! Holds the dinosaur and feature record types, the error taxonomy shared
//! by every crate, and the [`store::RecordStore`] seam the view layer
//! persists through.

pub mod error;
pub mod model;
pub mod store;
pub mod types;
