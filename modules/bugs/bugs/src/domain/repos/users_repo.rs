use std::collections::HashMap;

use async_trait::async_trait;
use bugs_sdk::User;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// A user together with its stored credential. Never leaves the domain layer.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// Repository trait for the user directory.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<User>, DomainError>;

    /// Look up a user and its password hash by email (exact match).
    async fn find_record_by_email<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<Option<UserRecord>, DomainError>;

    async fn exists_by_username<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<bool, DomainError>;

    async fn exists_by_email<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<bool, DomainError>;

    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: UserRecord,
    ) -> Result<User, DomainError>;

    /// Delete a user by ID. Returns `false` when nothing was deleted.
    async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<bool, DomainError>;

    /// Resolve display names for a set of user ids. Unknown ids are absent from the map.
    async fn usernames_by_ids<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, DomainError>;
}
