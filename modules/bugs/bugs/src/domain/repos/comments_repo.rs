use async_trait::async_trait;
use bugs_sdk::Comment;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Repository trait for comments.
#[async_trait]
pub trait CommentsRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<Comment>, DomainError>;

    /// Comments of a bug, most recently updated first.
    async fn list_for_bug<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bug_id: Uuid,
    ) -> Result<Vec<Comment>, DomainError>;

    /// Whether `author` already has a comment titled `title` on `bug_id` (ignoring `exclude`).
    async fn title_taken<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bug_id: Uuid,
        author: Uuid,
        title: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError>;

    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        comment: Comment,
    ) -> Result<Comment, DomainError>;

    async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<bool, DomainError>;

    async fn delete_for_bug<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bug_id: Uuid,
    ) -> Result<u64, DomainError>;

    /// Null out the author of every comment written by `user_id`.
    async fn clear_author<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<(), DomainError>;
}
