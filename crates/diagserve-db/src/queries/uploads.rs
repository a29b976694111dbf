//! Upload catalog queries.

use diagserve_core::{Error, Result, UploadId, UserId};
use rusqlite::Connection;

use crate::models::Upload;

/// Insert a new upload record with empty tags and return its id.
///
/// `user_id` is recorded as supplied; the catalog does not check that it
/// references an existing user.
pub fn create_upload(conn: &Connection, user_id: UserId, path: &str) -> Result<UploadId> {
    conn.execute(
        "INSERT INTO uploads (user_id, path, tags) VALUES (?1, ?2, '')",
        rusqlite::params![user_id.as_i64(), path],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(UploadId::from(conn.last_insert_rowid()))
}

/// List every upload record. Callers must not assume any ordering.
pub fn list_uploads(conn: &Connection) -> Result<Vec<Upload>> {
    let mut stmt = conn
        .prepare("SELECT id, user_id, path, tags FROM uploads")
        .map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], Upload::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Overwrite the tags of an upload unconditionally.
///
/// Zero rows affected is not an error: tag updates are best-effort and do
/// not check that the upload exists.
pub fn set_tags(conn: &Connection, id: UploadId, tags: &str) -> Result<()> {
    conn.execute(
        "UPDATE uploads SET tags = ?1 WHERE id = ?2",
        rusqlite::params![tags, id.as_i64()],
    )
    .map_err(|e| Error::database(e.to_string()))?;
    Ok(())
}

/// Get an upload by primary key.
pub fn get_upload(conn: &Connection, id: UploadId) -> Result<Option<Upload>> {
    let result = conn.query_row(
        "SELECT id, user_id, path, tags FROM uploads WHERE id = ?1",
        [id.as_i64()],
        Upload::from_row,
    );
    match result {
        Ok(u) => Ok(Some(u)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}
