//! `BugsClientV1` trait definition.
//!
//! This trait defines the public API for the `bugs` module.
//! Every bug and comment operation requires a `SecurityContext` naming the acting user.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::BugsError;
use crate::models::{
    Bug, BugDetail, BugFilter, CommentWithAuthor, Credentials, NewBug, NewComment, NewUser,
    Session, UpdateBugRequest, User,
};
use crate::security::SecurityContext;

/// Public API trait for the `bugs` module.
#[async_trait]
pub trait BugsClientV1: Send + Sync {
    // Sessions and directory

    /// Create a user account.
    async fn sign_up(&self, new_user: NewUser) -> Result<User, BugsError>;

    /// Check credentials and issue a bearer token.
    async fn sign_in(&self, credentials: Credentials) -> Result<Session, BugsError>;

    /// Revoke every token of the acting user.
    async fn sign_out(&self, ctx: &SecurityContext) -> Result<(), BugsError>;

    /// Resolve a bearer token to its (active) user.
    async fn authenticate(&self, token: &str) -> Result<User, BugsError>;

    /// Remove a user; their bugs and comments are kept with a null reference.
    async fn remove_user(&self, id: Uuid) -> Result<(), BugsError>;

    // Bugs

    async fn create_bug(&self, ctx: &SecurityContext, new_bug: NewBug)
    -> Result<BugDetail, BugsError>;

    async fn get_bug(&self, ctx: &SecurityContext, id: Uuid) -> Result<BugDetail, BugsError>;

    /// List bugs, most recently updated first.
    async fn list_bugs(
        &self,
        ctx: &SecurityContext,
        filter: BugFilter,
    ) -> Result<Vec<Bug>, BugsError>;

    async fn update_bug(
        &self,
        ctx: &SecurityContext,
        req: UpdateBugRequest,
    ) -> Result<BugDetail, BugsError>;

    async fn delete_bug(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), BugsError>;

    // Comments

    async fn create_comment(
        &self,
        ctx: &SecurityContext,
        new_comment: NewComment,
    ) -> Result<CommentWithAuthor, BugsError>;

    async fn delete_comment(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), BugsError>;
}
