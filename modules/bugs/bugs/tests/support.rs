#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `bugs` integration tests.
//!
//! Provides a migrated database, a wired module and seeding helpers.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use bugs::config::{BugsConfig, HashingConfig};
use bugs::module::ConcreteAppServices;
use bugs::{BugDetail, BugsModule, NewBug, NewUser, SecurityContext, User};
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

pub const PASSWORD: &str = "violet-Harbor-42";

/// Module configuration with cheap hashing so tests stay fast.
#[must_use]
pub fn test_config() -> BugsConfig {
    BugsConfig {
        hashing: HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        ..BugsConfig::default()
    }
}

pub struct TestContext {
    pub db: DatabaseConnection,
    pub module: BugsModule,
}

impl TestContext {
    /// Fresh in-memory `SQLite` database with migrations applied.
    pub async fn new() -> Self {
        Self::with_dsn("sqlite::memory:").await
    }

    pub async fn with_dsn(dsn: &str) -> Self {
        let db = Database::connect(dsn)
            .await
            .expect("Failed to connect to test database");
        let module = BugsModule::new(db.clone(), &test_config()).expect("Failed to wire module");
        module.migrate().await.expect("Failed to run migrations");
        Self { db, module }
    }

    #[must_use]
    pub fn services(&self) -> &ConcreteAppServices {
        self.module.services()
    }

    /// Sign up `username` (email `<username>@example.com`) and return it with its context.
    pub async fn user(&self, username: &str) -> (User, SecurityContext) {
        let user = self
            .services()
            .users
            .sign_up(new_user(username))
            .await
            .expect("Failed to sign up user");
        let ctx = SecurityContext::new(user.id);
        (user, ctx)
    }

    pub async fn bug(
        &self,
        ctx: &SecurityContext,
        title: &str,
        assignee: Option<Uuid>,
    ) -> BugDetail {
        self.services()
            .bugs
            .create_bug(
                ctx,
                NewBug {
                    title: title.to_owned(),
                    body: format!("Steps to reproduce {title}"),
                    assignee,
                },
            )
            .await
            .expect("Failed to create bug")
    }
}

#[must_use]
pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        password: PASSWORD.to_owned(),
    }
}
