use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let sql = schema_sql(manager.get_database_backend())?;
        manager.get_connection().execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        let sql = r#"
DROP TABLE IF EXISTS comments;
DROP TABLE IF EXISTS bugs;
DROP TABLE IF EXISTS auth_tokens;
DROP TABLE IF EXISTS users;
        "#;
        conn.execute_unprepared(sql).await?;
        Ok(())
    }
}

/// DDL for `backend`. Only `SQLite` and Postgres are supported.
fn schema_sql(backend: sea_orm::DatabaseBackend) -> Result<&'static str, DbErr> {
    let sql = match backend {
        sea_orm::DatabaseBackend::Postgres => {
            r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY NOT NULL,
    username VARCHAR(150) NOT NULL,
    email VARCHAR(254) NOT NULL,
    first_name VARCHAR(150) NOT NULL DEFAULT '',
    last_name VARCHAR(150) NOT NULL DEFAULT '',
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_users_username ON users(username);
CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);

CREATE TABLE IF NOT EXISTS auth_tokens (
    key VARCHAR(64) PRIMARY KEY NOT NULL,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_auth_tokens_user ON auth_tokens(user_id);

CREATE TABLE IF NOT EXISTS bugs (
    id UUID PRIMARY KEY NOT NULL,
    title VARCHAR(100) NOT NULL,
    body TEXT NOT NULL DEFAULT '',
    resolved BOOLEAN NOT NULL DEFAULT FALSE,
    assigner_id UUID NULL REFERENCES users(id) ON DELETE SET NULL,
    assignee_id UUID NULL REFERENCES users(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_bugs_title ON bugs(title);
CREATE INDEX IF NOT EXISTS idx_bugs_updated_at ON bugs(updated_at);

CREATE TABLE IF NOT EXISTS comments (
    id UUID PRIMARY KEY NOT NULL,
    bug_id UUID NOT NULL REFERENCES bugs(id) ON DELETE CASCADE,
    author_id UUID NULL REFERENCES users(id) ON DELETE SET NULL,
    title VARCHAR(100) NOT NULL,
    body TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_comments_bug_author_title ON comments(bug_id, author_id, title);
            "#
        }
        sea_orm::DatabaseBackend::MySql => {
            return Err(DbErr::Migration("unsupported backend: MySQL".to_owned()));
        }
        sea_orm::DatabaseBackend::Sqlite => {
            r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL,
    email TEXT NOT NULL,
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT '',
    is_active INTEGER NOT NULL DEFAULT 1,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_users_username ON users(username);
CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);

CREATE TABLE IF NOT EXISTS auth_tokens (
    key TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_auth_tokens_user ON auth_tokens(user_id);

CREATE TABLE IF NOT EXISTS bugs (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    body TEXT NOT NULL DEFAULT '',
    resolved INTEGER NOT NULL DEFAULT 0,
    assigner_id TEXT NULL REFERENCES users(id) ON DELETE SET NULL,
    assignee_id TEXT NULL REFERENCES users(id) ON DELETE SET NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_bugs_title ON bugs(title);
CREATE INDEX IF NOT EXISTS idx_bugs_updated_at ON bugs(updated_at);

CREATE TABLE IF NOT EXISTS comments (
    id TEXT PRIMARY KEY NOT NULL,
    bug_id TEXT NOT NULL REFERENCES bugs(id) ON DELETE CASCADE,
    author_id TEXT NULL REFERENCES users(id) ON DELETE SET NULL,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_comments_bug_author_title ON comments(bug_id, author_id, title);
            "#
        }
    };
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_is_rejected() {
        let err = schema_sql(sea_orm::DatabaseBackend::MySql).unwrap_err();
        assert!(matches!(err, DbErr::Migration(msg) if msg.contains("MySQL")));
    }

    #[test]
    fn supported_backends_cascade_comments() {
        for backend in [
            sea_orm::DatabaseBackend::Sqlite,
            sea_orm::DatabaseBackend::Postgres,
        ] {
            let sql = schema_sql(backend).unwrap();
            assert!(sql.contains("REFERENCES bugs(id) ON DELETE CASCADE"));
        }
    }
}
