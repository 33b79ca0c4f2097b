//! Public error types for the `bugs` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can be returned by the `BugsClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BugsError {
    /// The requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// The request violates a data rule (duplicate title, self-assignment, weak password...).
    #[error("{message}")]
    Validation { message: String },

    /// The caller could not be authenticated (bad credentials, inactive account, bad token).
    #[error("{message}")]
    Unauthenticated { message: String },

    /// The caller is authenticated but is not allowed to perform the action.
    #[error("{message}")]
    PermissionDenied { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl BugsError {
    #[must_use]
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
