use std::sync::Arc;

use bugs_sdk::{Comment, CommentWithAuthor, NewComment, SecurityContext};
use sea_orm::{DatabaseConnection, TransactionTrait};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::normalize_title;
use crate::domain::error::DomainError;
use crate::domain::messages;
use crate::domain::repos::{BugsRepository, CommentsRepository, UsersRepository};

/// Comment store, scoped to bugs. Comments cannot be edited once posted.
pub struct CommentsService<CR, BR, UR> {
    comments: Arc<CR>,
    bugs: Arc<BR>,
    users: Arc<UR>,
    db: DatabaseConnection,
}

impl<CR, BR, UR> CommentsService<CR, BR, UR>
where
    CR: CommentsRepository,
    BR: BugsRepository,
    UR: UsersRepository,
{
    pub fn new(comments: Arc<CR>, bugs: Arc<BR>, users: Arc<UR>, db: DatabaseConnection) -> Self {
        Self {
            comments,
            bugs,
            users,
            db,
        }
    }

    #[instrument(skip(self, ctx, new_comment), fields(actor.id = %ctx.subject_id(), bug.id = %new_comment.bug_id))]
    pub async fn create_comment(
        &self,
        ctx: &SecurityContext,
        new_comment: NewComment,
    ) -> Result<CommentWithAuthor, DomainError> {
        info!("Creating new comment");

        let actor = ctx.subject_id();
        let title = normalize_title("title", &new_comment.title)?;
        if new_comment.body.trim().is_empty() {
            return Err(DomainError::field("body", messages::REQUIRED));
        }

        let txn = self.db.begin().await?;

        if self.bugs.get(&txn, new_comment.bug_id).await?.is_none() {
            return Err(DomainError::field("bug", messages::UNKNOWN_BUG));
        }
        if self
            .comments
            .title_taken(&txn, new_comment.bug_id, actor, &title, None)
            .await?
        {
            return Err(DomainError::validation(messages::COMMENT_TITLE_TAKEN));
        }

        let now = OffsetDateTime::now_utc();
        let comment = Comment {
            id: Uuid::now_v7(),
            bug_id: new_comment.bug_id,
            title,
            body: new_comment.body,
            author: Some(actor),
            created_at: now,
            updated_at: now,
        };
        let comment = self.comments.create(&txn, comment).await?;
        let author_username = self.users.get(&txn, actor).await?.map(|u| u.username);

        txn.commit().await?;

        info!(comment.id = %comment.id, "Successfully created comment");
        Ok(CommentWithAuthor {
            comment,
            author_username,
        })
    }

    /// Delete a comment. Only its author may do this.
    #[instrument(skip(self, ctx), fields(actor.id = %ctx.subject_id(), comment.id = %id))]
    pub async fn delete_comment(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting comment");

        let txn = self.db.begin().await?;

        let comment = self
            .comments
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment", id))?;

        if comment.author != Some(ctx.subject_id()) {
            return Err(DomainError::permission(messages::NOT_COMMENT_AUTHOR));
        }

        if !self.comments.delete(&txn, id).await? {
            return Err(DomainError::not_found("Comment", id));
        }
        txn.commit().await?;

        info!("Successfully deleted comment");
        Ok(())
    }
}
