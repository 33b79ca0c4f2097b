//! Local implementation of `BugsClientV1`.
//!
//! Used for in-process consumers. Delegates to the domain services and converts
//! errors to SDK error types.

use async_trait::async_trait;
use uuid::Uuid;

use bugs_sdk::{
    Bug, BugDetail, BugFilter, BugsClientV1, BugsError, CommentWithAuthor, Credentials, NewBug,
    NewComment, NewUser, SecurityContext, Session, UpdateBugRequest, User,
};

use crate::module::ConcreteAppServices;

/// Local implementation of the `BugsClientV1` trait that delegates to the domain services.
pub struct BugsLocalClient {
    services: ConcreteAppServices,
}

impl BugsLocalClient {
    #[must_use]
    pub fn new(services: ConcreteAppServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl BugsClientV1 for BugsLocalClient {
    async fn sign_up(&self, new_user: NewUser) -> Result<User, BugsError> {
        self.services
            .users
            .sign_up(new_user)
            .await
            .map_err(Into::into)
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<Session, BugsError> {
        self.services
            .sessions
            .sign_in(credentials)
            .await
            .map_err(Into::into)
    }

    async fn sign_out(&self, ctx: &SecurityContext) -> Result<(), BugsError> {
        self.services
            .sessions
            .sign_out(ctx)
            .await
            .map_err(Into::into)
    }

    async fn authenticate(&self, token: &str) -> Result<User, BugsError> {
        self.services
            .sessions
            .authenticate(token)
            .await
            .map_err(Into::into)
    }

    async fn remove_user(&self, id: Uuid) -> Result<(), BugsError> {
        self.services.users.remove_user(id).await.map_err(Into::into)
    }

    async fn create_bug(
        &self,
        ctx: &SecurityContext,
        new_bug: NewBug,
    ) -> Result<BugDetail, BugsError> {
        self.services
            .bugs
            .create_bug(ctx, new_bug)
            .await
            .map_err(Into::into)
    }

    async fn get_bug(&self, ctx: &SecurityContext, id: Uuid) -> Result<BugDetail, BugsError> {
        self.services
            .bugs
            .get_bug(ctx, id)
            .await
            .map_err(Into::into)
    }

    async fn list_bugs(
        &self,
        ctx: &SecurityContext,
        filter: BugFilter,
    ) -> Result<Vec<Bug>, BugsError> {
        self.services
            .bugs
            .list_bugs(ctx, filter)
            .await
            .map_err(Into::into)
    }

    async fn update_bug(
        &self,
        ctx: &SecurityContext,
        req: UpdateBugRequest,
    ) -> Result<BugDetail, BugsError> {
        self.services
            .bugs
            .update_bug(ctx, req)
            .await
            .map_err(Into::into)
    }

    async fn delete_bug(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), BugsError> {
        self.services
            .bugs
            .delete_bug(ctx, id)
            .await
            .map_err(Into::into)
    }

    async fn create_comment(
        &self,
        ctx: &SecurityContext,
        new_comment: NewComment,
    ) -> Result<CommentWithAuthor, BugsError> {
        self.services
            .comments
            .create_comment(ctx, new_comment)
            .await
            .map_err(Into::into)
    }

    async fn delete_comment(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), BugsError> {
        self.services
            .comments
            .delete_comment(ctx, id)
            .await
            .map_err(Into::into)
    }
}
