//! Tag mutation and tag-vocabulary route handlers.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use diagserve_core::{Error, UploadId};

use crate::context::AppContext;
use crate::error::AppError;
use crate::extract::FormOrJson;

/// Request body for overwriting an upload's tags.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SetTagRequest {
    pub id: i64,
    pub tags: String,
}

/// POST /diag/settag — overwrite the free-text tags of an upload.
///
/// Best-effort: succeeds even when the id matches no row. The tags field is
/// replaced wholesale, never merged.
#[utoipa::path(
    post,
    path = "/diag/settag",
    request_body = SetTagRequest,
    responses(
        (status = 200, description = "Tags overwritten"),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Catalog fault")
    )
)]
pub async fn set_tag(
    State(ctx): State<AppContext>,
    FormOrJson(payload): FormOrJson<SetTagRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let conn = diagserve_db::pool::get_conn(&ctx.db)?;
    diagserve_db::queries::uploads::set_tags(&conn, UploadId::from(payload.id), &payload.tags)?;

    Ok(Json(serde_json::json!({})))
}

/// GET /diag/tags — serve the static tag-definitions file verbatim.
#[utoipa::path(
    get,
    path = "/diag/tags",
    responses(
        (status = 200, description = "Tag vocabulary file contents"),
        (status = 500, description = "Vocabulary file unreadable")
    )
)]
pub async fn tag_vocabulary(State(ctx): State<AppContext>) -> Result<impl IntoResponse, AppError> {
    let data = std::fs::read(&ctx.config.storage.tags_file).map_err(Error::from)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        data,
    ))
}
