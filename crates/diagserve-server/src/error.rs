//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`diagserve_core::Error`] so that route
//! handlers can return `Result<T, AppError>` and use `?` on catalog and
//! blob-store calls directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: diagserve_core::Error,
}

impl AppError {
    pub fn new(inner: diagserve_core::Error) -> Self {
        Self { inner }
    }
}

impl From<diagserve_core::Error> for AppError {
    fn from(e: diagserve_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Storage faults carry full detail in the server log; the client
        // only sees the display string.
        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        let code = match &self.inner {
            diagserve_core::Error::NotFound { .. } => "not_found",
            diagserve_core::Error::Validation(_) => "validation_error",
            diagserve_core::Error::Conflict(_) => "conflict",
            diagserve_core::Error::Database { .. } => "database_error",
            diagserve_core::Error::Io { .. } => "io_error",
            diagserve_core::Error::Internal(_) => "internal_error",
        };

        let body = json!({
            "error": self.inner.to_string(),
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
