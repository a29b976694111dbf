//! Axum router construction.
//!
//! Builds the full application router with all route groups, middleware
//! layers, the read-only blob mount, and optional static asset serving.

use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::blobs::PUBLIC_IMAGE_MOUNT;
use crate::context::AppContext;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::users::check_user,
        routes::uploads::upload_image,
        routes::uploads::list_images,
        routes::tags::set_tag,
        routes::tags::tag_vocabulary,
    ),
    components(schemas(
        routes::users::CheckUserRequest,
        routes::users::CheckUserResponse,
        routes::uploads::UploadResponse,
        routes::uploads::ImageRecord,
        routes::uploads::ImagesResponse,
        routes::tags::SetTagRequest,
    ))
)]
struct ApiDoc;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_dir = ctx.config.storage.upload_dir.clone();

    let api = Router::new()
        .route("/diag/checkuser", post(routes::users::check_user))
        .route("/diag/upload", post(routes::uploads::upload_image))
        .route("/diag/images", get(routes::uploads::list_images))
        .route("/diag/settag", post(routes::tags::set_tag))
        .route("/diag/tags", get(routes::tags::tag_vocabulary));

    let mut app = Router::new()
        .route("/health", get(health_check))
        .merge(api)
        // Uploaded blobs, served read-only.
        .nest_service(PUBLIC_IMAGE_MOUNT, ServeDir::new(&upload_dir))
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Static file serving for frontend assets.
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            app = app.fallback_service(
                ServeDir::new(&dir).append_index_html_on_directories(true),
            );
        }
    }

    app
}

async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}
