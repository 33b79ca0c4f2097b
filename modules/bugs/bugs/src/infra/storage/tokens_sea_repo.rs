use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::TokensRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::auth_token::{
    ActiveModel as TokenAM, Column, Entity as TokenEntity,
};

/// ORM-based implementation of the `TokensRepository` trait.
#[derive(Clone, Default)]
pub struct OrmTokensRepository;

impl OrmTokensRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TokensRepository for OrmTokensRepository {
    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        digest: &str,
        user_id: Uuid,
        created_at: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let m = TokenAM {
            key: Set(digest.to_owned()),
            user_id: Set(user_id),
            created_at: Set(created_at),
        };
        let _ = m.insert(conn).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_user_id<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        digest: &str,
    ) -> Result<Option<Uuid>, DomainError> {
        let found = TokenEntity::find_by_id(digest.to_owned())
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(|t| t.user_id))
    }

    async fn delete_for_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<u64, DomainError> {
        let result = TokenEntity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
