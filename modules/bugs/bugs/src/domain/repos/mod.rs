//! Repository traits for the bugs module.
//!
//! Every method takes a generic connection so services can run it either on the
//! pooled connection or inside a transaction.

mod bugs_repo;
mod comments_repo;
mod tokens_repo;
mod users_repo;

pub use bugs_repo::BugsRepository;
pub use comments_repo::CommentsRepository;
pub use tokens_repo::TokensRepository;
pub use users_repo::{UserRecord, UsersRepository};
