//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`.

use diagserve_core::{UploadId, UserId};

/// A named identity in the `user` table.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: UserId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
        })
    }
}

/// An uploaded-image record in the `uploads` table.
///
/// `path` is the externally addressable route string, not the on-disk
/// location. `tags` starts empty and is overwritten wholesale on update.
#[derive(Debug, Clone)]
pub struct Upload {
    pub id: UploadId,
    pub user_id: UserId,
    pub path: String,
    pub tags: String,
}

impl Upload {
    /// Build from a row selected as: id, user_id, path, tags.
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: UploadId::from(row.get::<_, i64>(0)?),
            user_id: UserId::from(row.get::<_, i64>(1)?),
            path: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            tags: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        })
    }
}
