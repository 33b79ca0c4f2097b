//! REST handlers, one submodule per resource.
//!
//! Handlers translate wire types to domain calls and wrap results in the envelope;
//! they hold no business rules.

use uuid::Uuid;

use crate::api::rest::error::ApiError;

pub mod auth;
pub mod bugs;
pub mod comments;

/// Parse a path id. Anything that is not a UUID cannot name a record.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Not found.".to_owned()))
}
