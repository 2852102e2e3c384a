/// A single request/response exchange with the record store failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The store answered with a non-2xx status.
    #[error("Record store error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The store has no record at that identifier.
    #[error("Record {id} not found in store")]
    NotFound { id: String },

    /// The response body did not match the expected payload shape.
    #[error("Unexpected response payload: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Request(#[from] RequestError),
}
