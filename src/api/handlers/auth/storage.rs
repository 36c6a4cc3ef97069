//! Database helpers for credentials.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Row from the users table. The hash is a PHC string, never a plaintext.
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub enum SignupOutcome {
    Created(Uuid),
    Conflict,
}

/// Look up a user by exact (case-sensitive) username.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<UserRecord>> {
    let row = sqlx::query("SELECT id, username, password_hash FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
        .context("failed to lookup user")?;

    Ok(row.map(|row| UserRecord {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
    }))
}

/// Insert a new user, relying on the unique constraint for duplicates.
///
/// A concurrent registration for the same username loses the race inside the
/// database, not in a lookup this layer cannot serialize.
///
/// # Errors
///
/// Returns an error on any database failure other than a unique violation.
pub async fn insert_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
) -> Result<SignupOutcome> {
    let row = sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id")
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await;

    match row {
        Ok(row) => Ok(SignupOutcome::Created(row.get("id"))),
        Err(err) if is_unique_violation(&err) => Ok(SignupOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
