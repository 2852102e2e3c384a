/// Identifiers are opaque strings assigned by the record store.
pub type EntityId = String;

/// Feature identifiers live inside the owning entity's payload.
pub type FeatureId = String;
