//! diagserve-db: catalog schema, migrations, and query operations.
//!
//! SQLite via rusqlite with r2d2 connection pooling. The catalog holds two
//! tables: `user` (name-keyed identities) and `uploads` (image records with
//! free-text tags).
//!
//! # Example
//!
//! ```no_run
//! use diagserve_db::pool::{get_conn, init_pool};
//! use diagserve_db::queries::users;
//!
//! let pool = init_pool("/var/lib/diagserve/diagserve.db").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let user_id = users::resolve_or_create_user(&conn, "kingwang").unwrap();
//! println!("resolved user: {user_id}");
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
