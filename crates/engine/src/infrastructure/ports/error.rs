//! Error types for port operations.

/// Background catalog errors with context for debugging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Catalog data could not be read.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// Catalog data was read but is malformed.
    #[error("Catalog data invalid: {0}")]
    InvalidData(String),
}

impl CatalogError {
    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }

    pub fn invalid_data(message: impl ToString) -> Self {
        Self::InvalidData(message.to_string())
    }
}
