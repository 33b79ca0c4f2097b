use async_trait::async_trait;
use bugs_sdk::{Bug, BugFilter};
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Repository trait for bug records.
#[async_trait]
pub trait BugsRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<Bug>, DomainError>;

    /// Bugs matching every constraint of `filter`, most recently updated first.
    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: &BugFilter,
    ) -> Result<Vec<Bug>, DomainError>;

    /// Whether any bug other than `exclude` already uses `title`.
    async fn title_taken<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        title: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError>;

    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bug: Bug,
    ) -> Result<Bug, DomainError>;

    async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bug: Bug,
    ) -> Result<Bug, DomainError>;

    async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<bool, DomainError>;

    /// Null out assigner/assignee wherever they reference `user_id`.
    async fn clear_user_references<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<(), DomainError>;
}
