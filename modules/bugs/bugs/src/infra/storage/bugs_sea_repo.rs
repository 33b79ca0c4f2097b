use async_trait::async_trait;
use bugs_sdk::{Bug, BugFilter};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::messages;
use crate::domain::repos::BugsRepository;
use crate::infra::storage::db::{db_err, unique_or};
use crate::infra::storage::entity::bug::{ActiveModel as BugAM, Column, Entity as BugEntity};

/// ORM-based implementation of the `BugsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmBugsRepository;

impl OrmBugsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn to_active(bug: &Bug) -> BugAM {
    BugAM {
        id: Set(bug.id),
        title: Set(bug.title.clone()),
        body: Set(bug.body.clone()),
        resolved: Set(bug.resolved),
        assigner_id: Set(bug.assigner),
        assignee_id: Set(bug.assignee),
        created_at: Set(bug.created_at),
        updated_at: Set(bug.updated_at),
    }
}

fn filter_condition(filter: &BugFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(resolved) = filter.resolved {
        cond = cond.add(Column::Resolved.eq(resolved));
    }
    if let Some(assigner) = filter.assigner {
        cond = cond.add(Column::AssignerId.eq(assigner));
    }
    if let Some(assignee) = filter.assignee {
        cond = cond.add(Column::AssigneeId.eq(assignee));
    }
    cond
}

#[async_trait]
impl BugsRepository for OrmBugsRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<Bug>, DomainError> {
        let found = BugEntity::find_by_id(id).one(conn).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: &BugFilter,
    ) -> Result<Vec<Bug>, DomainError> {
        let rows = BugEntity::find()
            .filter(filter_condition(filter))
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
        title: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let mut query = BugEntity::find().filter(Column::Title.eq(title));
        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }
        let count = query.count(conn).await.map_err(db_err)?;
        Ok(count > 0)
    }

    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bug: Bug,
    ) -> Result<Bug, DomainError> {
        let _ = to_active(&bug)
            .insert(conn)
            .await
            .map_err(|e| unique_or(e, DomainError::field("title", messages::BUG_TITLE_TAKEN)))?;
        Ok(bug)
    }

    async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bug: Bug,
    ) -> Result<Bug, DomainError> {
        let _ = to_active(&bug)
            .update(conn)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => DomainError::not_found("Bug", bug.id),
                e => unique_or(e, DomainError::field("title", messages::BUG_TITLE_TAKEN)),
            })?;
        Ok(bug)
    }

    async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<bool, DomainError> {
        let result = BugEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn clear_user_references<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        BugEntity::update_many()
            .col_expr(Column::AssignerId, Expr::value(Option::<Uuid>::None))
            .filter(Column::AssignerId.eq(user_id))
            .exec(conn)
            .await
            .map_err(db_err)?;

        BugEntity::update_many()
            .col_expr(Column::AssigneeId, Expr::value(Option::<Uuid>::None))
            .filter(Column::AssigneeId.eq(user_id))
            .exec(conn)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}
