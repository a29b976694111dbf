//! Service-oriented application context.
//!
//! [`AppContext`] is the central struct shared across all route handlers via
//! Axum state. Each workflow receives its dependencies (catalog pool, blob
//! store, config) explicitly through this struct; there is no process-wide
//! shared state, so tests can construct an isolated context per case.

use std::sync::Arc;

use diagserve_core::config::Config;
use diagserve_db::pool::DbPool;

use crate::blobs::BlobStore;

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s and the pool
/// handle (itself an `Arc` internally).
#[derive(Clone)]
pub struct AppContext {
    /// Catalog connection pool.
    pub db: DbPool,
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Filesystem blob store for uploaded images.
    pub blobs: Arc<BlobStore>,
}
