use std::sync::Arc;

use bugs_sdk::{Credentials, SecurityContext, Session, User};
use sea_orm::DatabaseConnection;
use time::OffsetDateTime;
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::messages;
use crate::domain::ports::CredentialHasher;
use crate::domain::repos::{TokensRepository, UsersRepository};
use crate::infra::crypto::{new_token, token_digest};

/// Issues, revokes and resolves bearer tokens.
pub struct SessionsService<UR, TR> {
    users: Arc<UR>,
    tokens: Arc<TR>,
    db: DatabaseConnection,
    hasher: Arc<dyn CredentialHasher>,
    token_bytes: usize,
}

impl<UR, TR> SessionsService<UR, TR>
where
    UR: UsersRepository,
    TR: TokensRepository,
{
    pub fn new(
        users: Arc<UR>,
        tokens: Arc<TR>,
        db: DatabaseConnection,
        hasher: Arc<dyn CredentialHasher>,
        token_bytes: usize,
    ) -> Self {
        Self {
            users,
            tokens,
            db,
            hasher,
            token_bytes,
        }
    }

    /// Check credentials and issue a new token. Earlier tokens stay valid until sign-out.
    #[instrument(skip(self, credentials))]
    pub async fn sign_in(&self, credentials: Credentials) -> Result<Session, DomainError> {
        let Credentials { email, password } = credentials;

        let record = self
            .users
            .find_record_by_email(&self.db, email.trim())
            .await?
            .ok_or_else(|| DomainError::auth(messages::NO_ACCOUNT))?;

        let hasher = Arc::clone(&self.hasher);
        let hash = record.password_hash;
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("verification task failed: {e}")))?;
        if !matches {
            return Err(DomainError::auth(messages::INVALID_CREDENTIALS));
        }

        let user = record.user;
        if !user.is_active {
            return Err(DomainError::auth(messages::INACTIVE_ACCOUNT));
        }

        let token = new_token(self.token_bytes);
        self.tokens
            .create(
                &self.db,
                &token_digest(&token),
                user.id,
                OffsetDateTime::now_utc(),
            )
            .await?;

        info!(user.id = %user.id, "User signed in");
        Ok(Session { user, token })
    }

    /// Revoke every token of the acting user.
    #[instrument(skip(self, ctx), fields(actor.id = %ctx.subject_id()))]
    pub async fn sign_out(&self, ctx: &SecurityContext) -> Result<(), DomainError> {
        let revoked = self
            .tokens
            .delete_for_user(&self.db, ctx.subject_id())
            .await?;
        info!(revoked, "User signed out");
        Ok(())
    }

    /// Resolve a presented token to its active owner.
    #[instrument(skip_all)]
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::auth(messages::INVALID_TOKEN));
        }

        let user_id = self
            .tokens
            .find_user_id(&self.db, &token_digest(token))
            .await?
            .ok_or_else(|| DomainError::auth(messages::INVALID_TOKEN))?;

        let user = self
            .users
            .get(&self.db, user_id)
            .await?
            .ok_or_else(|| DomainError::auth(messages::INVALID_TOKEN))?;

        if !user.is_active {
            return Err(DomainError::auth(messages::INACTIVE_ACCOUNT));
        }

        debug!(user.id = %user.id, "Token authenticated");
        Ok(user)
    }
}
