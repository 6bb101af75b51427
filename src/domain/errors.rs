/// Failures surfaced by the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The catalog answered with a non-success status code.
    #[error("API Error: {status}")]
    Remote { status: u16 },

    /// The catalog has no such resource.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// An episode reference without a trailing numeric identifier.
    #[error("Malformed episode reference: {0}")]
    MalformedReference(String),

    /// The request never produced a response (network, DNS, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures reading or writing the favorite store.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Favorites storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Favorites storage is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
