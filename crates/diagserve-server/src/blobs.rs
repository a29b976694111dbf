//! Filesystem-level blob storage for uploaded images.
//!
//! Blobs are organized by user id under a base directory and named by the
//! wall-clock nanosecond timestamp at write time plus the original file
//! extension. The timestamp is the sole collision-avoidance mechanism: two
//! uploads for the same user within the same clock tick overwrite each
//! other silently.

use std::path::{Path, PathBuf};

use chrono::Utc;
use diagserve_core::{Result, UserId};

/// Route prefix under which uploaded blobs are served read-only.
pub const PUBLIC_IMAGE_MOUNT: &str = "/diag/img";

/// Metadata about a stored blob.
#[derive(Debug)]
pub struct StoredBlob {
    /// Externally addressable route path (`/diag/img/<user>/<ts><ext>`).
    pub route_path: String,
    /// Location of the written file on disk.
    pub disk_path: PathBuf,
}

/// Filesystem manager for uploaded image blobs.
///
/// Writes are one-shot: a failed write may leave a zero-length or truncated
/// file behind, and nothing here ever rewrites or deletes a blob.
pub struct BlobStore {
    base_dir: PathBuf,
}

impl BlobStore {
    /// Create a new `BlobStore` rooted at the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Persist `contents` under the per-user directory and return the
    /// externally addressable path.
    pub fn store(&self, user_id: UserId, filename: &str, contents: &[u8]) -> Result<StoredBlob> {
        let user_dir = self.base_dir.join(user_id.to_string());
        std::fs::create_dir_all(&user_dir)?;

        // Permissive directory mode; these files are served publicly from
        // the static mount.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(&user_dir, std::fs::Permissions::from_mode(0o777));
        }

        let ext = file_extension(filename);
        let ts = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let file_name = format!("{ts}{ext}");

        let disk_path = user_dir.join(&file_name);
        std::fs::write(&disk_path, contents)?;

        Ok(StoredBlob {
            route_path: format!("{PUBLIC_IMAGE_MOUNT}/{user_id}/{file_name}"),
            disk_path,
        })
    }
}

/// Extension of `filename` including the leading dot; empty when absent.
fn file_extension(filename: &str) -> String {
    match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!(".{ext}"),
        None => String::new(),
    }
}
