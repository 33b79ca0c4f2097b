//! Domain layer: business rules, repository ports and services.
//!
//! The domain layer MUST NOT import `api::*`; it speaks SDK contract types and
//! `DomainError`, and reaches storage only through the `repos` traits.

pub mod error;
pub mod filter;
pub mod messages;
pub mod password;
pub mod ports;
pub mod repos;
pub mod service;
