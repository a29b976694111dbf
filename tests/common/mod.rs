//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB, a temp upload
//! directory with a tag-vocabulary file, and a full `AppContext`. The
//! [`TestHarness::with_server`] constructor starts Axum on a random port for
//! HTTP-level testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tempfile::TempDir;

use diagserve_core::config::Config;
use diagserve_db::pool::{get_conn, init_memory_pool, DbPool, PooledConnection};
use diagserve_server::blobs::BlobStore;
use diagserve_server::context::AppContext;
use diagserve_server::router::build_router;

/// Default tag vocabulary written into every harness.
#[allow(dead_code)]
pub const TAG_VOCABULARY: &[u8] = br#"{"tags":["winter","summer","pale","dark"]}"#;

/// Test harness wrapping a fully-constructed `AppContext` backed by an
/// in-memory database and a throwaway upload directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
    /// Keeps the temp upload directory alive for the harness lifetime.
    #[allow(dead_code)]
    upload_dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration, in-memory DB, and a
    /// temp upload directory.
    pub fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("failed to create upload dir");

        let mut config = Config::default();
        config.storage.upload_dir = upload_dir.path().to_path_buf();
        config.storage.tags_file = upload_dir.path().join("tags.json");
        std::fs::write(&config.storage.tags_file, TAG_VOCABULARY)
            .expect("failed to write tag vocabulary");

        let db = init_memory_pool().expect("failed to create in-memory pool");
        let blobs = Arc::new(BlobStore::new(config.storage.upload_dir.clone()));

        let ctx = AppContext {
            db: db.clone(),
            config: Arc::new(config),
            blobs,
        };

        Self {
            ctx,
            db,
            upload_dir,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = build_router(harness.ctx.clone(), None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Get a database connection from the pool.
    #[allow(dead_code)]
    pub fn conn(&self) -> PooledConnection {
        get_conn(&self.db).expect("failed to get db connection")
    }

    /// Path to the tag-vocabulary file inside the harness upload dir.
    #[allow(dead_code)]
    pub fn tags_file(&self) -> std::path::PathBuf {
        self.upload_dir.path().join("tags.json")
    }
}
