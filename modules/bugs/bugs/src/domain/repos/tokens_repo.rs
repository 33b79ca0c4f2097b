use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Repository trait for bearer tokens. Only token digests are ever stored.
#[async_trait]
pub trait TokensRepository: Send + Sync {
    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        digest: &str,
        user_id: Uuid,
        created_at: OffsetDateTime,
    ) -> Result<(), DomainError>;

    /// Owner of the token with the given digest, if any.
    async fn find_user_id<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        digest: &str,
    ) -> Result<Option<Uuid>, DomainError>;

    /// Revoke every token of a user. Returns the number of revoked tokens.
    async fn delete_for_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<u64, DomainError>;
}
