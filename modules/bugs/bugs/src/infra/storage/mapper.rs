use bugs_sdk::{Bug, Comment, User};

use crate::domain::repos::UserRecord;
use crate::infra::storage::entity::{bug, comment, user};

impl From<user::Model> for User {
    fn from(e: user::Model) -> Self {
        Self {
            id: e.id,
            username: e.username,
            email: e.email,
            first_name: e.first_name,
            last_name: e.last_name,
            is_active: e.is_active,
            created_at: e.created_at,
        }
    }
}

impl From<user::Model> for UserRecord {
    fn from(e: user::Model) -> Self {
        let password_hash = e.password_hash.clone();
        Self {
            user: e.into(),
            password_hash,
        }
    }
}

impl From<bug::Model> for Bug {
    fn from(e: bug::Model) -> Self {
        Self {
            id: e.id,
            title: e.title,
            body: e.body,
            resolved: e.resolved,
            assigner: e.assigner_id,
            assignee: e.assignee_id,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<comment::Model> for Comment {
    fn from(e: comment::Model) -> Self {
        Self {
            id: e.id,
            bug_id: e.bug_id,
            title: e.title,
            body: e.body,
            author: e.author_id,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
