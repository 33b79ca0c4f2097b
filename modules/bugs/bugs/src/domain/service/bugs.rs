use std::sync::Arc;

use bugs_sdk::{
    Bug, BugDetail, BugFilter, BugPatch, CommentWithAuthor, NewBug, SecurityContext,
    UpdateBugRequest,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use time::OffsetDateTime;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::normalize_title;
use crate::domain::error::DomainError;
use crate::domain::messages;
use crate::domain::repos::{BugsRepository, CommentsRepository, UsersRepository};

/// Decide whether `actor` may apply `patch` to `bug`.
///
/// Participants only; the assignee may change `resolved` and nothing else in the
/// same request; nobody may make themselves the assignee. Checked in that order.
pub fn check_update_permission(bug: &Bug, actor: Uuid, patch: &BugPatch) -> Result<(), DomainError> {
    let is_assigner = bug.assigner == Some(actor);
    let is_assignee = bug.assignee == Some(actor);

    if !is_assigner && !is_assignee {
        return Err(DomainError::permission(messages::NOT_A_PARTICIPANT));
    }

    let assignee_resolve_only = patch.is_resolve_only() && is_assignee;
    if !(assignee_resolve_only || is_assigner) {
        return Err(DomainError::permission(messages::ASSIGNEE_RESOLVE_ONLY));
    }

    if patch.assignee == Some(Some(actor)) {
        return Err(DomainError::validation(messages::SELF_ASSIGNMENT));
    }

    Ok(())
}

/// Bug store: CRUD plus the assignment and resolution rules.
pub struct BugsService<BR, CR, UR> {
    bugs: Arc<BR>,
    comments: Arc<CR>,
    users: Arc<UR>,
    db: DatabaseConnection,
}

impl<BR, CR, UR> BugsService<BR, CR, UR>
where
    BR: BugsRepository,
    CR: CommentsRepository,
    UR: UsersRepository,
{
    pub fn new(bugs: Arc<BR>, comments: Arc<CR>, users: Arc<UR>, db: DatabaseConnection) -> Self {
        Self {
            bugs,
            comments,
            users,
            db,
        }
    }

    #[instrument(skip(self, ctx, new_bug), fields(actor.id = %ctx.subject_id()))]
    pub async fn create_bug(
        &self,
        ctx: &SecurityContext,
        new_bug: NewBug,
    ) -> Result<BugDetail, DomainError> {
        info!("Creating new bug");

        let actor = ctx.subject_id();
        let title = normalize_title("title", &new_bug.title)?;

        let txn = self.db.begin().await?;

        if self.bugs.title_taken(&txn, &title, None).await? {
            return Err(DomainError::field("title", messages::BUG_TITLE_TAKEN));
        }
        if new_bug.assignee == Some(actor) {
            return Err(DomainError::validation(messages::SELF_ASSIGNMENT));
        }
        if let Some(assignee) = new_bug.assignee {
            self.ensure_user_exists(&txn, assignee).await?;
        }

        let now = OffsetDateTime::now_utc();
        let bug = Bug {
            id: Uuid::now_v7(),
            title,
            body: new_bug.body,
            resolved: false,
            assigner: Some(actor),
            assignee: new_bug.assignee,
            created_at: now,
            updated_at: now,
        };

        let bug = self.bugs.create(&txn, bug).await?;
        let detail = self.load_detail(&txn, bug).await?;
        txn.commit().await?;

        info!(bug.id = %detail.bug.id, "Successfully created bug");
        Ok(detail)
    }

    #[instrument(skip(self, ctx), fields(actor.id = %ctx.subject_id(), bug.id = %id))]
    pub async fn get_bug(&self, ctx: &SecurityContext, id: Uuid) -> Result<BugDetail, DomainError> {
        debug!("Getting bug by id");

        let bug = self
            .bugs
            .get(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bug", id))?;

        self.load_detail(&self.db, bug).await
    }

    #[instrument(skip(self, ctx), fields(actor.id = %ctx.subject_id()))]
    pub async fn list_bugs(
        &self,
        ctx: &SecurityContext,
        filter: BugFilter,
    ) -> Result<Vec<Bug>, DomainError> {
        let bugs = self.bugs.list(&self.db, &filter).await?;
        debug!("Listed {} bugs", bugs.len());
        Ok(bugs)
    }

    #[instrument(skip(self, ctx, req), fields(actor.id = %ctx.subject_id(), bug.id = %req.id))]
    pub async fn update_bug(
        &self,
        ctx: &SecurityContext,
        req: UpdateBugRequest,
    ) -> Result<BugDetail, DomainError> {
        info!("Updating bug");

        let actor = ctx.subject_id();
        let UpdateBugRequest { id, patch } = req;

        let txn = self.db.begin().await?;

        let mut current = self
            .bugs
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bug", id))?;

        check_update_permission(&current, actor, &patch)?;

        if let Some(raw) = &patch.title {
            let title = normalize_title("title", raw)?;
            if self.bugs.title_taken(&txn, &title, Some(id)).await? {
                return Err(DomainError::field("title", messages::BUG_TITLE_TAKEN));
            }
            current.title = title;
        }
        if let Some(Some(assignee)) = patch.assignee {
            self.ensure_user_exists(&txn, assignee).await?;
        }

        if let Some(body) = patch.body {
            current.body = body;
        }
        if let Some(assignee) = patch.assignee {
            current.assignee = assignee;
        }
        if let Some(resolved) = patch.resolved {
            current.resolved = resolved;
        }
        current.updated_at = OffsetDateTime::now_utc();

        let bug = self.bugs.update(&txn, current).await?;
        let detail = self.load_detail(&txn, bug).await?;
        txn.commit().await?;

        info!("Successfully updated bug");
        Ok(detail)
    }

    /// Delete a bug and its comments. Only the assigner may do this.
    #[instrument(skip(self, ctx), fields(actor.id = %ctx.subject_id(), bug.id = %id))]
    pub async fn delete_bug(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting bug");

        let txn = self.db.begin().await?;

        let bug = self
            .bugs
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bug", id))?;

        if bug.assigner != Some(ctx.subject_id()) {
            return Err(DomainError::permission(messages::NOT_BUG_CREATOR));
        }

        let removed_comments = self.comments.delete_for_bug(&txn, id).await?;
        if !self.bugs.delete(&txn, id).await? {
            return Err(DomainError::not_found("Bug", id));
        }
        txn.commit().await?;

        info!(removed_comments, "Successfully deleted bug");
        Ok(())
    }

    async fn ensure_user_exists<C>(&self, conn: &C, id: Uuid) -> Result<(), DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        match self.users.get(conn, id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::field("assignee", messages::UNKNOWN_ASSIGNEE)),
        }
    }

    /// Resolve users and read the current comment list of `bug`.
    async fn load_detail<C>(&self, conn: &C, bug: Bug) -> Result<BugDetail, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let assigner = match bug.assigner {
            Some(id) => self.users.get(conn, id).await?,
            None => None,
        };
        let assignee = match bug.assignee {
            Some(id) => self.users.get(conn, id).await?,
            None => None,
        };

        let comments = self.comments.list_for_bug(conn, bug.id).await?;
        let mut author_ids: Vec<Uuid> = comments.iter().filter_map(|c| c.author).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let names = self.users.usernames_by_ids(conn, &author_ids).await?;

        let comments = comments
            .into_iter()
            .map(|comment| {
                let author_username = comment.author.and_then(|a| names.get(&a).cloned());
                CommentWithAuthor {
                    comment,
                    author_username,
                }
            })
            .collect();

        Ok(BugDetail {
            bug,
            assigner,
            assignee,
            comments,
        })
    }
}
