//! Image upload and catalog listing route handlers.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use diagserve_core::{Error, UploadId, UserId};
use diagserve_db::models::Upload;

use crate::context::AppContext;
use crate::error::AppError;

/// Response for a successful upload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    #[serde(rename = "uploadID")]
    #[schema(value_type = i64)]
    pub upload_id: UploadId,
    /// Route path at which the stored image is retrievable.
    pub path: String,
}

/// A single catalog record.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ImageRecord {
    #[schema(value_type = i64)]
    pub id: UploadId,
    #[schema(value_type = i64)]
    pub user_id: UserId,
    pub path: String,
    pub tags: String,
}

impl ImageRecord {
    fn from_model(upload: &Upload) -> Self {
        Self {
            id: upload.id,
            user_id: upload.user_id,
            path: upload.path.clone(),
            tags: upload.tags.clone(),
        }
    }
}

/// Full catalog listing.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ImagesResponse {
    pub images: Vec<ImageRecord>,
}

/// POST /diag/upload — store an image blob for a user and record it in the
/// catalog.
///
/// Multipart fields: `userID` (string-encoded integer) and `image` (file).
/// The supplied user id is trusted as-is; it is not checked against the
/// `user` table. A blob already written to disk is left in place if the
/// catalog insert afterwards fails.
#[utoipa::path(
    post,
    path = "/diag/upload",
    responses(
        (status = 200, description = "Image stored and cataloged", body = UploadResponse),
        (status = 400, description = "Missing or non-integer userID, or unreadable image field"),
        (status = 500, description = "Blob or catalog fault")
    )
)]
pub async fn upload_image(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut raw_user_id: Option<String> = None;
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Failed to read multipart data: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "userID" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::Validation(format!("Failed to read userID field: {e}")))?;
                raw_user_id = Some(text);
            }
            "image" => {
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::Validation(format!("Failed to read image field: {e}")))?;
                image = Some((filename, data.to_vec()));
            }
            _ => {
                tracing::debug!("Ignoring unknown multipart field: {field_name}");
            }
        }
    }

    let raw_user_id =
        raw_user_id.ok_or_else(|| Error::Validation("'userID' is required".into()))?;
    let user_id: UserId = raw_user_id
        .parse()
        .map_err(|_| Error::Validation("'userID' must be an integer".into()))?;
    let (filename, contents) =
        image.ok_or_else(|| Error::Validation("'image' file is required".into()))?;

    let blob = ctx.blobs.store(user_id, &filename, &contents)?;

    let conn = diagserve_db::pool::get_conn(&ctx.db)?;
    let upload_id = diagserve_db::queries::uploads::create_upload(&conn, user_id, &blob.route_path)?;

    Ok(Json(UploadResponse {
        upload_id,
        path: blob.route_path,
    }))
}

/// GET /diag/images — list every catalog record.
///
/// No filtering, pagination, or ordering guarantee; all rows come back in
/// one response.
#[utoipa::path(
    get,
    path = "/diag/images",
    responses(
        (status = 200, description = "Full catalog listing", body = ImagesResponse),
        (status = 500, description = "Catalog fault")
    )
)]
pub async fn list_images(
    State(ctx): State<AppContext>,
) -> Result<Json<ImagesResponse>, AppError> {
    let conn = diagserve_db::pool::get_conn(&ctx.db)?;
    let uploads = diagserve_db::queries::uploads::list_uploads(&conn)?;

    Ok(Json(ImagesResponse {
        images: uploads.iter().map(ImageRecord::from_model).collect(),
    }))
}
