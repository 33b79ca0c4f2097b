//! REST transport for the bugs module.
//!
//! - `routes` - axum routing and layer wiring
//! - `auth` - bearer-token middleware producing a `SecurityContext`
//! - `handlers` - request handlers per resource
//! - `dto` - wire types
//! - `envelope` / `error` - the `{status, message, data}` response shape

pub mod auth;
pub mod dto;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod routes;
