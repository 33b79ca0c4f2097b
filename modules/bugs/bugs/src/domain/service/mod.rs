//! Domain service layer - business logic and rules.
//!
//! Per-resource submodules:
//! - `users` - sign-up and user removal
//! - `sessions` - sign-in, sign-out and token authentication
//! - `bugs` - bug CRUD and the assigner/assignee permission rules
//! - `comments` - comment creation and author-only deletion
//!
//! Every mutating operation runs inside one database transaction covering its
//! checks and its writes. Reads run on the pooled connection.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::error::DomainError;
use crate::domain::messages;
use crate::domain::password::PasswordPolicy;
use crate::domain::ports::CredentialHasher;
use crate::domain::repos::{BugsRepository, CommentsRepository, TokensRepository, UsersRepository};

mod bugs;
mod comments;
mod sessions;
mod users;

pub use bugs::{BugsService, check_update_permission};
pub use comments::CommentsService;
pub use sessions::SessionsService;
pub use users::UsersService;

/// Configuration for the domain services
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub password_policy: PasswordPolicy,
    pub token_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            password_policy: PasswordPolicy::default(),
            token_bytes: 20,
        }
    }
}

// DI Container - aggregates all domain services
pub struct AppServices<UR, TR, BR, CR>
where
    UR: UsersRepository + 'static,
    TR: TokensRepository + 'static,
    BR: BugsRepository + 'static,
    CR: CommentsRepository + 'static,
{
    pub users: Arc<UsersService<UR, TR, BR, CR>>,
    pub sessions: Arc<SessionsService<UR, TR>>,
    pub bugs: Arc<BugsService<BR, CR, UR>>,
    pub comments: Arc<CommentsService<CR, BR, UR>>,
}

impl<UR, TR, BR, CR> Clone for AppServices<UR, TR, BR, CR>
where
    UR: UsersRepository + 'static,
    TR: TokensRepository + 'static,
    BR: BugsRepository + 'static,
    CR: CommentsRepository + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            sessions: Arc::clone(&self.sessions),
            bugs: Arc::clone(&self.bugs),
            comments: Arc::clone(&self.comments),
        }
    }
}

impl<UR, TR, BR, CR> AppServices<UR, TR, BR, CR>
where
    UR: UsersRepository + 'static,
    TR: TokensRepository + 'static,
    BR: BugsRepository + 'static,
    CR: CommentsRepository + 'static,
{
    pub fn new(
        users_repo: UR,
        tokens_repo: TR,
        bugs_repo: BR,
        comments_repo: CR,
        db: DatabaseConnection,
        hasher: Arc<dyn CredentialHasher>,
        config: ServiceConfig,
    ) -> Self {
        let users_repo = Arc::new(users_repo);
        let tokens_repo = Arc::new(tokens_repo);
        let bugs_repo = Arc::new(bugs_repo);
        let comments_repo = Arc::new(comments_repo);

        Self {
            users: Arc::new(UsersService::new(
                Arc::clone(&users_repo),
                Arc::clone(&tokens_repo),
                Arc::clone(&bugs_repo),
                Arc::clone(&comments_repo),
                db.clone(),
                Arc::clone(&hasher),
                config.password_policy,
            )),
            sessions: Arc::new(SessionsService::new(
                Arc::clone(&users_repo),
                Arc::clone(&tokens_repo),
                db.clone(),
                hasher,
                config.token_bytes,
            )),
            bugs: Arc::new(BugsService::new(
                Arc::clone(&bugs_repo),
                Arc::clone(&comments_repo),
                Arc::clone(&users_repo),
                db.clone(),
            )),
            comments: Arc::new(CommentsService::new(
                comments_repo,
                bugs_repo,
                users_repo,
                db,
            )),
        }
    }
}

/// Trim a title and enforce the non-empty and length rules.
pub(crate) fn normalize_title(field: &str, raw: &str) -> Result<String, DomainError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DomainError::field(field, messages::REQUIRED));
    }
    if title.chars().count() > messages::TITLE_MAX_LEN {
        return Err(DomainError::field(
            field,
            format!(
                "Ensure this field has no more than {} characters.",
                messages::TITLE_MAX_LEN
            ),
        ));
    }
    Ok(title.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed() {
        assert_eq!(normalize_title("title", "  Crash on save ").unwrap(), "Crash on save");
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = normalize_title("title", "   ").unwrap_err();
        assert_eq!(err, DomainError::field("title", messages::REQUIRED));
    }

    #[test]
    fn title_length_is_counted_in_characters() {
        assert!(normalize_title("title", &"é".repeat(100)).is_ok());
        assert!(normalize_title("title", &"é".repeat(101)).is_err());
    }
}
