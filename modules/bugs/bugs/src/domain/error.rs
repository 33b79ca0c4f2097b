use bugs_sdk::BugsError;
use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected by a business rule. `field` names the offending request field when
    /// the rule is scoped to one.
    #[error("{message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    #[error("{message}")]
    Auth { message: String },

    #[error("{message}")]
    Permission { message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::database(e.to_string())
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for BugsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { message, .. } => BugsError::validation(message),
            DomainError::Auth { message } => BugsError::unauthenticated(message),
            DomainError::Permission { message } => BugsError::permission_denied(message),
            DomainError::NotFound { entity, id } => BugsError::not_found(entity, id),
            DomainError::Database { .. } | DomainError::Internal { .. } => BugsError::internal(),
        }
    }
}
