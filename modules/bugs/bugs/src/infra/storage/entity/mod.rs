pub mod auth_token;
pub mod bug;
pub mod comment;
pub mod user;
