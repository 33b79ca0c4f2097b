use std::sync::Arc;

use bugs_sdk::{NewUser, User};
use sea_orm::{DatabaseConnection, TransactionTrait};
use time::OffsetDateTime;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::messages;
use crate::domain::password::{PasswordPolicy, PasswordSubject};
use crate::domain::ports::CredentialHasher;
use crate::domain::repos::{
    BugsRepository, CommentsRepository, TokensRepository, UserRecord, UsersRepository,
};

/// User directory: sign-up, lookup and removal.
pub struct UsersService<UR, TR, BR, CR> {
    users: Arc<UR>,
    tokens: Arc<TR>,
    bugs: Arc<BR>,
    comments: Arc<CR>,
    db: DatabaseConnection,
    hasher: Arc<dyn CredentialHasher>,
    policy: PasswordPolicy,
}

impl<UR, TR, BR, CR> UsersService<UR, TR, BR, CR>
where
    UR: UsersRepository,
    TR: TokensRepository,
    BR: BugsRepository,
    CR: CommentsRepository,
{
    pub fn new(
        users: Arc<UR>,
        tokens: Arc<TR>,
        bugs: Arc<BR>,
        comments: Arc<CR>,
        db: DatabaseConnection,
        hasher: Arc<dyn CredentialHasher>,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            users,
            tokens,
            bugs,
            comments,
            db,
            hasher,
            policy,
        }
    }

    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn sign_up(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Signing up new user");

        let NewUser {
            username,
            email,
            first_name,
            last_name,
            password,
        } = new_user;

        let username = username.trim().to_owned();
        let email = email.trim().to_owned();
        let first_name = first_name.trim().to_owned();
        let last_name = last_name.trim().to_owned();

        if username.is_empty() {
            return Err(DomainError::field("username", messages::REQUIRED));
        }
        if email.is_empty() {
            return Err(DomainError::field("email", messages::REQUIRED));
        }
        if !is_valid_email(&email) {
            return Err(DomainError::field("email", messages::INVALID_EMAIL));
        }

        // Cheap uniqueness pre-check so a taken username does not pay for a hash.
        // The authoritative check runs again inside the transaction.
        self.ensure_unique(&self.db, &username, &email).await?;

        self.policy.check(
            &password,
            &PasswordSubject {
                username: &username,
                email: &email,
                first_name: &first_name,
                last_name: &last_name,
            },
        )?;

        let hasher = Arc::clone(&self.hasher);
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("hashing task failed: {e}")))??;

        let record = UserRecord {
            user: User {
                id: Uuid::now_v7(),
                username,
                email,
                first_name,
                last_name,
                is_active: true,
                created_at: OffsetDateTime::now_utc(),
            },
            password_hash,
        };

        let txn = self.db.begin().await?;
        self.ensure_unique(&txn, &record.user.username, &record.user.email)
            .await?;
        let user = self.users.create(&txn, record).await?;
        txn.commit().await?;

        info!(user.id = %user.id, "Successfully signed up user");
        Ok(user)
    }

    #[instrument(skip(self), fields(user.id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting user by id");
        self.users
            .get(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    /// Delete a user, revoking their tokens and detaching their bugs and comments.
    #[instrument(skip(self), fields(user.id = %id))]
    pub async fn remove_user(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Removing user");

        let txn = self.db.begin().await?;

        if self.users.get(&txn, id).await?.is_none() {
            return Err(DomainError::not_found("User", id));
        }

        let revoked = self.tokens.delete_for_user(&txn, id).await?;
        self.bugs.clear_user_references(&txn, id).await?;
        self.comments.clear_author(&txn, id).await?;
        self.users.delete(&txn, id).await?;

        txn.commit().await?;

        info!(revoked_tokens = revoked, "Successfully removed user");
        Ok(())
    }

    async fn ensure_unique<C>(&self, conn: &C, username: &str, email: &str) -> Result<(), DomainError>
    where
        C: sea_orm::ConnectionTrait + Send + Sync,
    {
        if self.users.exists_by_username(conn, username).await? {
            return Err(DomainError::field("username", messages::USERNAME_TAKEN));
        }
        if self.users.exists_by_email(conn, email).await? {
            return Err(DomainError::field("email", messages::EMAIL_TAKEN));
        }
        Ok(())
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain, no whitespace.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
        && domain.contains('.')
}
