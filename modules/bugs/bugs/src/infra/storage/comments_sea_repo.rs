use async_trait::async_trait;
use bugs_sdk::Comment;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::messages;
use crate::domain::repos::CommentsRepository;
use crate::infra::storage::db::{db_err, unique_or};
use crate::infra::storage::entity::comment::{
    ActiveModel as CommentAM, Column, Entity as CommentEntity,
};

/// ORM-based implementation of the `CommentsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmCommentsRepository;

impl OrmCommentsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommentsRepository for OrmCommentsRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<Comment>, DomainError> {
        let found = CommentEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list_for_bug<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bug_id: Uuid,
    ) -> Result<Vec<Comment>, DomainError> {
        let rows = CommentEntity::find()
            .filter(Column::BugId.eq(bug_id))
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn title_taken<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bug_id: Uuid,
        author: Uuid,
        title: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let mut query = CommentEntity::find()
            .filter(Column::BugId.eq(bug_id))
            .filter(Column::AuthorId.eq(author))
            .filter(Column::Title.eq(title));
        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }
        let count = query.count(conn).await.map_err(db_err)?;
        Ok(count > 0)
    }

    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        comment: Comment,
    ) -> Result<Comment, DomainError> {
        let m = CommentAM {
            id: Set(comment.id),
            bug_id: Set(comment.bug_id),
            author_id: Set(comment.author),
            title: Set(comment.title.clone()),
            body: Set(comment.body.clone()),
            created_at: Set(comment.created_at),
            updated_at: Set(comment.updated_at),
        };
        let _ = m.insert(conn).await.map_err(|e| {
            unique_or(e, DomainError::validation(messages::COMMENT_TITLE_TAKEN))
        })?;
        Ok(comment)
    }

    async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<bool, DomainError> {
        let result = CommentEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_for_bug<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bug_id: Uuid,
    ) -> Result<u64, DomainError> {
        let result = CommentEntity::delete_many()
            .filter(Column::BugId.eq(bug_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }

    async fn clear_author<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        CommentEntity::update_many()
            .col_expr(Column::AuthorId, Expr::value(Option::<Uuid>::None))
            .filter(Column::AuthorId.eq(user_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
