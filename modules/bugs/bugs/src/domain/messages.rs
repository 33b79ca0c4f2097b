//! User-facing rule messages shared by the services and the storage layer.

pub const BUG_TITLE_TAKEN: &str = "A bug with this title already exists";
pub const SELF_ASSIGNMENT: &str = "You cannot assign a bug to yourself";
pub const NOT_A_PARTICIPANT: &str = "this is not a valid action";
pub const ASSIGNEE_RESOLVE_ONLY: &str = "you are only permitted to resolve a bug";
pub const NOT_BUG_CREATOR: &str = "you are not the creator of this bug";
pub const UNKNOWN_ASSIGNEE: &str = "The selected assignee does not exist";

pub const COMMENT_TITLE_TAKEN: &str = "You already made a comment with this title";
pub const NOT_COMMENT_AUTHOR: &str = "you are not the author of this comment";
pub const UNKNOWN_BUG: &str = "The selected bug does not exist";

pub const EMAIL_TAKEN: &str = "A user already exists with this email address";
pub const USERNAME_TAKEN: &str = "A user already exists with this username";
pub const INVALID_EMAIL: &str = "Enter a valid email address";

pub const NO_ACCOUNT: &str = "You dont have an account with us";
pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";
pub const INACTIVE_ACCOUNT: &str = "You cannot be logged in";
pub const INVALID_TOKEN: &str = "Invalid token.";

pub const REQUIRED: &str = "This field may not be blank.";
pub const NULL_NOT_ALLOWED: &str = "This field may not be null.";
pub const TITLE_MAX_LEN: usize = 100;
