use bugs_sdk::{
    Bug, BugDetail, BugPatch, CommentWithAuthor, Credentials, NewBug, NewComment, NewUser, User,
};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::messages;

// ==================== Auth ====================

/// REST DTO for signing up. Missing strings are treated as blank.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SignUpReq {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<SignUpReq> for NewUser {
    fn from(req: SignUpReq) -> Self {
        Self {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SignInReq {
    pub email: String,
    pub password: String,
}

impl From<SignInReq> for Credentials {
    fn from(req: SignInReq) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// Public user representation. Never includes credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
        }
    }
}

/// Sign-in payload: the user's fields plus the issued token.
#[derive(Debug, Clone, Serialize)]
pub struct SignInDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub token: String,
}

// ==================== Bugs ====================

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CreateBugReq {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub assignee: Option<Uuid>,
}

impl From<CreateBugReq> for NewBug {
    fn from(req: CreateBugReq) -> Self {
        Self {
            title: req.title,
            body: req.body,
            assignee: req.assignee,
        }
    }
}

/// REST DTO for updating a bug (partial).
///
/// `"assignee": null` unassigns the bug; omitting the key leaves it untouched.
/// An explicit `null` for any other field is rejected rather than dropped.
/// Unknown keys are ignored and never count as changes.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateBugReq {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub body: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub assignee: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "present")]
    pub resolved: Option<Option<bool>>,
}

/// Distinguish an explicit `null` from an absent key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn not_null<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, DomainError> {
    match value {
        None => Ok(None),
        Some(Some(v)) => Ok(Some(v)),
        Some(None) => Err(DomainError::field(field, messages::NULL_NOT_ALLOWED)),
    }
}

impl TryFrom<UpdateBugReq> for BugPatch {
    type Error = DomainError;

    fn try_from(req: UpdateBugReq) -> Result<Self, Self::Error> {
        Ok(Self {
            title: not_null("title", req.title)?,
            body: not_null("body", req.body)?,
            assignee: req.assignee,
            resolved: not_null("resolved", req.resolved)?,
        })
    }
}

/// Raw list filters, parsed by the domain.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BugListQuery {
    pub resolved: Option<String>,
    pub assigner: Option<String>,
    pub assignee: Option<String>,
}

/// Bug in list views: users as bare ids, no comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BugListItemDto {
    pub id: Uuid,
    pub title: String,
    pub resolved: bool,
    pub assigner: Option<Uuid>,
    pub assignee: Option<Uuid>,
}

impl From<Bug> for BugListItemDto {
    fn from(bug: Bug) -> Self {
        Self {
            id: bug.id,
            title: bug.title,
            resolved: bug.resolved,
            assigner: bug.assigner,
            assignee: bug.assignee,
        }
    }
}

/// Full bug with nested users and its comments.
#[derive(Debug, Clone, Serialize)]
pub struct BugDetailDto {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub resolved: bool,
    pub assigner: Option<UserDto>,
    pub assignee: Option<UserDto>,
    pub comments: Vec<CommentListDto>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<BugDetail> for BugDetailDto {
    fn from(detail: BugDetail) -> Self {
        let BugDetail {
            bug,
            assigner,
            assignee,
            comments,
        } = detail;
        let comments = comments
            .into_iter()
            .map(|c| CommentListDto::new(c, &bug.title))
            .collect();
        Self {
            id: bug.id,
            title: bug.title,
            body: bug.body,
            resolved: bug.resolved,
            assigner: assigner.map(Into::into),
            assignee: assignee.map(Into::into),
            comments,
            created_at: bug.created_at,
            updated_at: bug.updated_at,
        }
    }
}

// ==================== Comments ====================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentReq {
    pub bug: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl From<CreateCommentReq> for NewComment {
    fn from(req: CreateCommentReq) -> Self {
        Self {
            bug_id: req.bug,
            title: req.title,
            body: req.body,
        }
    }
}

/// Comment as returned on creation: the bug is referenced by id.
#[derive(Debug, Clone, Serialize)]
pub struct CommentDto {
    pub id: Uuid,
    pub author: Option<String>,
    pub bug: Uuid,
    pub title: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<CommentWithAuthor> for CommentDto {
    fn from(c: CommentWithAuthor) -> Self {
        let CommentWithAuthor {
            comment,
            author_username,
        } = c;
        Self {
            id: comment.id,
            author: author_username,
            bug: comment.bug_id,
            title: comment.title,
            body: comment.body,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Comment nested in a bug detail: the bug is referenced by title.
#[derive(Debug, Clone, Serialize)]
pub struct CommentListDto {
    pub id: Uuid,
    pub author: Option<String>,
    pub bug: String,
    pub title: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl CommentListDto {
    fn new(c: CommentWithAuthor, bug_title: &str) -> Self {
        let CommentWithAuthor {
            comment,
            author_username,
        } = c;
        Self {
            id: comment.id,
            author: author_username,
            bug: bug_title.to_owned(),
            title: comment.title,
            body: comment.body,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
