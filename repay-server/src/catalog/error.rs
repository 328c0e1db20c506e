//! Catalog loading error types.

use crate::domain::DomainError;

/// Errors that can occur when loading the operator catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON for the expected shape
    #[error("catalog JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An operator entry failed validation
    #[error("invalid operator {operator:?}: {source}")]
    InvalidOperator {
        operator: String,
        #[source]
        source: DomainError,
    },

    /// Two operators share a name
    #[error("duplicate operator name: {0}")]
    DuplicateOperator(String),
}
