//! diagserve-server: HTTP boundary and upload workflows.
//!
//! This crate ties the catalog (diagserve-db) and blob store together behind
//! an Axum HTTP API. It provides:
//!
//! - Route handlers for user resolution, image upload, catalog listing, and
//!   tag mutation
//! - A read-only static mount serving uploaded blobs
//! - CORS, request tracing, and OpenAPI documentation
//! - Graceful shutdown via signal handling

pub mod blobs;
pub mod context;
pub mod error;
pub mod extract;
pub mod router;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use diagserve_core::config::Config;

use crate::blobs::BlobStore;
use crate::context::AppContext;

/// Start the diagserve server.
///
/// This is the main entry point. It initializes the catalog database and
/// blob directory, constructs the [`AppContext`], and serves HTTP until a
/// shutdown signal is received.
pub async fn start(config: Config) -> diagserve_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    // Initialize the catalog database.
    let db_path = &config.storage.db_path;
    let existed = db_path.exists();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::info!("Created database directory {}", parent.display());
        }
    }
    let db_str = db_path.to_string_lossy();
    let db = diagserve_db::pool::init_pool(&db_str)?;
    if existed {
        tracing::info!("Database opened (existing) at {db_str}");
    } else {
        tracing::info!("Database created (new) at {db_str}");
    }

    // Ensure the blob base directory exists before the static mount and
    // first upload touch it.
    std::fs::create_dir_all(&config.storage.upload_dir)?;
    let blobs = Arc::new(BlobStore::new(config.storage.upload_dir.clone()));

    let ctx = AppContext {
        db,
        config: Arc::new(config.clone()),
        blobs,
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| diagserve_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let app = router::build_router(ctx, config.server.static_dir.clone());

    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| diagserve_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
