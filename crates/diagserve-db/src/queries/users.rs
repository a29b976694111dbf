//! User resolution queries.

use diagserve_core::{Error, Result, UserId};
use rusqlite::Connection;

use crate::models::User;

/// Resolve a user by name, creating it if it does not exist.
///
/// Runs as a single atomic upsert so two concurrent requests for the same
/// name cannot race a check-then-insert into duplicate rows; the UNIQUE
/// constraint on `name` plus `ON CONFLICT` guarantees both callers observe
/// the same id. The no-op `DO UPDATE` is what makes SQLite return the
/// existing row through `RETURNING`.
///
/// Empty names are accepted if supplied; validating presence is the
/// caller's responsibility.
pub fn resolve_or_create_user(conn: &Connection, name: &str) -> Result<UserId> {
    let id: i64 = conn
        .query_row(
            "INSERT INTO user (name) VALUES (?1)
             ON CONFLICT(name) DO UPDATE SET name = excluded.name
             RETURNING id",
            [name],
            |row| row.get(0),
        )
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                Error::Conflict(format!("User '{name}' already exists"))
            } else {
                Error::database(e.to_string())
            }
        })?;

    Ok(UserId::from(id))
}

/// Get a user by name.
pub fn get_user_by_name(conn: &Connection, name: &str) -> Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, name FROM user WHERE name = ?1",
        [name],
        User::from_row,
    );
    match result {
        Ok(u) => Ok(Some(u)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}
