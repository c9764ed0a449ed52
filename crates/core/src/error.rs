//! Domain-level error type shared by the storage and HTTP layers.

use crate::types::DbId;
use crate::validation::FieldErrors;

/// Domain errors raised below the HTTP layer.
///
/// The api crate wraps this in its `AppError` and maps each variant to an
/// HTTP status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A path-identified resource does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A payload failed validation; carries every failing field.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// A uniqueness or state conflict (e.g. duplicate username).
    #[error("{0}")]
    Conflict(String),

    /// Missing, expired, or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Valid credentials but insufficient role.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure. The message is logged, never sent
    /// to the client.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// Build a single-field validation error.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.push(field, message);
        CoreError::Validation(errors)
    }
}
