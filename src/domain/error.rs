//! Typed failure taxonomy for the catalog core.
//!
//! The transport layer maps these kinds onto HTTP status codes; the core
//! never formats a response itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed or disallowed input (bad search key, bad record shape,
    /// out-of-range page number). Recoverable by the caller fixing input.
    #[error("{0}")]
    Validation(String),

    /// No entity matches the given identity/criteria.
    #[error("{0}")]
    NotFound(String),

    /// Attempted insertion of an identity that already exists.
    #[error("{0}")]
    Duplicate(String),

    /// A mutation was performed but post-write verification shows it did
    /// not take effect. Fatal for the request, never retried.
    #[error("{0}")]
    Update(String),

    /// The backing file could not be rewritten.
    #[error("failed to write library file {path}: {message}")]
    Storage { path: String, message: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
