//! Infrastructure storage layer - SeaORM persistence.
//!
//! - `entity/` - SeaORM entity definitions (users, auth tokens, bugs, comments)
//! - `mapper.rs` - Conversions between SeaORM models and SDK contract types
//! - `migrations/` - Database schema migrations
//! - `*_sea_repo.rs` - Repository implementations
//!
//! All SeaORM-specific code lives here; the domain sees only the repository traits.

pub mod bugs_sea_repo;
pub mod comments_sea_repo;
pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod tokens_sea_repo;
pub mod users_sea_repo;

pub use bugs_sea_repo::OrmBugsRepository;
pub use comments_sea_repo::OrmCommentsRepository;
pub use tokens_sea_repo::OrmTokensRepository;
pub use users_sea_repo::OrmUsersRepository;
