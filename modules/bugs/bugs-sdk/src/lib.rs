//! Bugs SDK
//!
//! This crate provides the public API for the `bugs` module:
//! - `BugsClientV1` trait
//! - Model types for users, sessions, bugs and comments
//! - Error type (`BugsError`)
//! - `SecurityContext` identifying the acting user
//!
//! ## Usage
//!
//! ```ignore
//! use bugs_sdk::{BugsClientV1, NewBug, SecurityContext};
//!
//! let ctx = SecurityContext::new(user_id);
//! let bug = client.create_bug(&ctx, NewBug { title, body, assignee }).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod client;
pub mod errors;
pub mod models;
pub mod security;

pub use client::BugsClientV1;
pub use errors::BugsError;
pub use models::{
    Bug, BugDetail, BugFilter, BugPatch, Comment, CommentWithAuthor, Credentials, NewBug,
    NewComment, NewUser, Session, UpdateBugRequest, User,
};
pub use security::SecurityContext;
