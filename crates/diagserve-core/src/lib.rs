//! diagserve-core: shared foundation types for diagserve.
//!
//! Provides the unified [`Error`] type, typed entity IDs, and application
//! [`config::Config`] used by every other crate in the workspace.

pub mod config;
pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::{UploadId, UserId};
