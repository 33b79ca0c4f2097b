//! Bugs Module
//!
//! Bug tracking with ownership-based permissions: users sign up and sign in,
//! create bugs, assign them to other users, comment on them and resolve them.
//!
//! ## Public API
//!
//! The public API is defined in the `bugs-sdk` crate and re-exported here:
//! - `BugsClientV1` - trait for in-process consumers
//! - `Bug`, `BugDetail`, `BugPatch`, `Comment`, `User`... - data models
//! - `BugsError` - error types
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// === PUBLIC API (from SDK) ===
pub use bugs_sdk::{
    Bug, BugDetail, BugFilter, BugPatch, BugsClientV1, BugsError, Comment, NewBug, NewComment,
    NewUser, SecurityContext, User,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::BugsModule;

// === LOCAL CLIENT ===
// Local client adapter that implements BugsClientV1
pub mod local_client;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and should NOT be used by external consumers.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
