//! Database helpers for AU records.

use anyhow::{Context, Result};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use super::types::{Au, NewAu};

fn au_from_row(row: &PgRow) -> Au {
    Au {
        id: row.get("id"),
        name: row.get("name"),
        author: row.get("author"),
        desc: row.get("description"),
        link: row.get("link"),
        created: row.get("created"),
        created_by: row.get("created_by"),
        created_by_username: row.try_get("username").ok(),
    }
}

/// All AUs, newest first, with the creator's username resolved.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Au>> {
    let rows = sqlx::query(
        r"
        SELECT aus.id, aus.name, aus.author, aus.description, aus.link,
               aus.created, aus.created_by, users.username
        FROM aus
        JOIN users ON users.id = aus.created_by
        ORDER BY aus.created DESC
        ",
    )
    .fetch_all(pool)
    .await
    .context("failed to list aus")?;

    Ok(rows.iter().map(au_from_row).collect())
}

/// Look up a single AU by id. The creator's username is not resolved here;
/// the only caller is the delete path, which needs `created_by`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Au>> {
    let row = sqlx::query(
        r"
        SELECT id, name, author, description, link, created, created_by
        FROM aus
        WHERE id = $1
        ",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("failed to lookup au")?;

    Ok(row.as_ref().map(au_from_row))
}

/// Insert a new AU owned by `created_by` and return the stored row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn insert(pool: &PgPool, new_au: &NewAu, created_by: Uuid) -> Result<Au> {
    let row = sqlx::query(
        r"
        INSERT INTO aus (name, author, description, link, created_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, author, description, link, created, created_by
        ",
    )
    .bind(&new_au.name)
    .bind(&new_au.author)
    .bind(&new_au.desc)
    .bind(new_au.link.as_deref().unwrap_or(""))
    .bind(created_by)
    .fetch_one(pool)
    .await
    .context("failed to insert au")?;

    Ok(au_from_row(&row))
}

/// Delete an AU by id. Returns whether a row was actually removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub async fn delete_by_id(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM aus WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete au")?;

    Ok(result.rows_affected() > 0)
}
