//! User resolution route handler.

use axum::extract::{Form, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use diagserve_core::UserId;

use crate::context::AppContext;
use crate::error::AppError;

/// Request body for resolving a user by name.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CheckUserRequest {
    /// Externally supplied user name. Empty strings are accepted; an absent
    /// field is rejected.
    pub name: Option<String>,
}

/// Resolved user id.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CheckUserResponse {
    #[serde(rename = "userID")]
    #[schema(value_type = i64)]
    pub user_id: UserId,
}

/// POST /diag/checkuser — resolve a user by name, creating it on first
/// reference. Idempotent: the same name always yields the same id.
#[utoipa::path(
    post,
    path = "/diag/checkuser",
    request_body(content = CheckUserRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User resolved", body = CheckUserResponse),
        (status = 400, description = "Missing name field"),
        (status = 500, description = "Catalog fault")
    )
)]
pub async fn check_user(
    State(ctx): State<AppContext>,
    Form(payload): Form<CheckUserRequest>,
) -> Result<Json<CheckUserResponse>, AppError> {
    let Some(name) = payload.name else {
        return Err(diagserve_core::Error::Validation("'name' is required".into()).into());
    };

    let conn = diagserve_db::pool::get_conn(&ctx.db)?;
    let user_id = diagserve_db::queries::users::resolve_or_create_user(&conn, &name)?;

    Ok(Json(CheckUserResponse { user_id }))
}
