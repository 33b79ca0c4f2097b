//! Public models for the `bugs` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the `bugs` module and its consumers.

use time::OffsetDateTime;
use uuid::Uuid;

/// A user from the directory. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

/// Profile and password for signing up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Email/password pair presented at sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Result of a successful sign-in. `token` is shown to the caller once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// A bug record. `assigner`/`assignee` are `None` when unset or when the
/// referenced user was removed from the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bug {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub resolved: bool,
    pub assigner: Option<Uuid>,
    pub assignee: Option<Uuid>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Bug with resolved users and its comments (newest first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugDetail {
    pub bug: Bug,
    pub assigner: Option<User>,
    pub assignee: Option<User>,
    pub comments: Vec<CommentWithAuthor>,
}

/// Data for creating a bug. The assigner is always the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBug {
    pub title: String,
    pub body: String,
    pub assignee: Option<Uuid>,
}

/// Partial update for a bug.
///
/// `assignee: Some(None)` clears the assignee; `None` leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BugPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub assignee: Option<Option<Uuid>>,
    pub resolved: Option<bool>,
}

impl BugPatch {
    /// Number of fields present in the change set.
    #[must_use]
    pub fn field_count(&self) -> usize {
        usize::from(self.title.is_some())
            + usize::from(self.body.is_some())
            + usize::from(self.assignee.is_some())
            + usize::from(self.resolved.is_some())
    }

    /// True when `resolved` is the only field present.
    #[must_use]
    pub fn is_resolve_only(&self) -> bool {
        self.resolved.is_some() && self.field_count() == 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }
}

/// Request to update a bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBugRequest {
    pub id: Uuid,
    pub patch: BugPatch,
}

/// Conjunctive filter over bugs. `None` imposes no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BugFilter {
    pub resolved: Option<bool>,
    pub assigner: Option<Uuid>,
    pub assignee: Option<Uuid>,
}

/// A comment on a bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub bug_id: Uuid,
    pub title: String,
    pub body: String,
    pub author: Option<Uuid>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Comment together with its author's display name (`None` for an unknown author).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author_username: Option<String>,
}

/// Data for creating a comment. The author is always the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub bug_id: Uuid,
    pub title: String,
    pub body: String,
}
