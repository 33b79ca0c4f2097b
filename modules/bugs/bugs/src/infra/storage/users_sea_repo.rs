use std::collections::HashMap;

use async_trait::async_trait;
use bugs_sdk::User;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::messages;
use crate::domain::repos::{UserRecord, UsersRepository};
use crate::infra::storage::db::{db_err, unique_or};
use crate::infra::storage::entity::user::{ActiveModel as UserAM, Column, Entity as UserEntity};

/// ORM-based implementation of the `UsersRepository` trait.
#[derive(Clone, Default)]
pub struct OrmUsersRepository;

impl OrmUsersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UsersRepository for OrmUsersRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<User>, DomainError> {
        let found = UserEntity::find_by_id(id).one(conn).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_record_by_email<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        let found = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn exists_by_username<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<bool, DomainError> {
        let count = UserEntity::find()
            .filter(Column::Username.eq(username))
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn exists_by_email<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<bool, DomainError> {
        let count = UserEntity::find()
            .filter(Column::Email.eq(email))
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: UserRecord,
    ) -> Result<User, DomainError> {
        let UserRecord {
            user,
            password_hash,
        } = record;

        let m = UserAM {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            is_active: Set(user.is_active),
            password_hash: Set(password_hash),
            created_at: Set(user.created_at),
        };

        // Both columns are unique; report whichever one the losing writer collided on.
        let _ = m.insert(conn).await.map_err(|e| {
            let on_conflict = match e.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(ref detail))
                    if detail.contains("username") =>
                {
                    DomainError::field("username", messages::USERNAME_TAKEN)
                }
                _ => DomainError::field("email", messages::EMAIL_TAKEN),
            };
            unique_or(e, on_conflict)
        })?;
        Ok(user)
    }

    async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<bool, DomainError> {
        let result = UserEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn usernames_by_ids<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, String)> = UserEntity::find()
            .select_only()
            .column(Column::Id)
            .column(Column::Username)
            .filter(Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(conn)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().collect())
    }
}
