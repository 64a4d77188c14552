//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Operation not allowed in current status: {0}")]
    StateConflict(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Persistence(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Caption pipeline failures. Aborts the whole generate-draft operation;
/// no retry, no partial draft.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion response malformed: {0}")]
    InvalidResponse(String),
}

/// A single platform's publish failure. Captured per platform and
/// aggregated into the post's failed status, never raised to the caller.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("platform rejected the post: {0}")]
    Api(String),
}

/// Image pool failures.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
