use actix_files::NamedFile;
use actix_web::{
    get, http::header, web, CustomizeResponder, HttpRequest, HttpResponse, Responder,
};

use crate::api::schemas::ErrorResponse;
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::cdn::application::domain::PublicFolder;
use crate::modules::cdn::application::ports::incoming::use_cases::ServedFile;
use crate::shared::api::AppError;
use crate::AppState;

/// Streams the file from disk. `Range`, `ETag` and `Last-Modified` come from `NamedFile`.
async fn file_response(
    file: ServedFile,
    cache_control: &'static str,
) -> Result<CustomizeResponder<NamedFile>, AppError> {
    let named = NamedFile::open_async(&file.path).await.map_err(|e| {
        tracing::warn!(path = %file.path.display(), error = %e, "Stored file could not be opened");
        AppError::not_found("FILE_NOT_FOUND", "File not found")
    })?;

    Ok(named
        .disable_content_disposition()
        .customize()
        .insert_header((header::CONTENT_TYPE, file.content_type))
        .insert_header((header::CACHE_CONTROL, cache_control)))
}

/// Serve a public file
///
/// `type` is `images` or `reviews`.
#[utoipa::path(
    get,
    path = "/api/cdn/{type}/{file_name}",
    tag = "cdn",
    params(
        ("type" = String, Path, description = "images | reviews"),
        ("file_name" = String, Path, description = "Stored file name"),
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 206, description = "Requested byte range"),
        (status = 400, description = "Unknown folder or unsafe file name", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
    )
)]
#[get("/api/cdn/{type}/{file_name}")]
pub async fn serve_public_file_handler(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (folder, file_name) = path.into_inner();
    let folder = PublicFolder::parse(&folder)
        .ok_or_else(|| AppError::bad_request("INVALID_FILE_PATH", "Invalid request"))?;

    let file = data.cdn.serve_public.execute(folder, &file_name).await?;
    Ok(file_response(file, "public, max-age=86400")
        .await?
        .respond_to(&req)
        .map_into_boxed_body())
}

/// Stream a course video
///
/// Only buyers of the course may fetch its videos.
#[utoipa::path(
    get,
    path = "/api/cdn/videos/{course_id}/{file_name}",
    tag = "cdn",
    security(("bearer_auth" = [])),
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("file_name" = String, Path, description = "Stored file name"),
    ),
    responses(
        (status = 200, description = "Video content", content_type = "video/mp4"),
        (status = 206, description = "Requested byte range", content_type = "video/mp4"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Course not purchased", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
    )
)]
#[get("/api/cdn/videos/{course_id}/{file_name}")]
pub async fn serve_course_video_handler(
    req: HttpRequest,
    user: AuthenticatedUser,
    path: web::Path<(i32, String)>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (course_id, file_name) = path.into_inner();

    let file = data
        .cdn
        .serve_video
        .execute(user.user_id, course_id, &file_name)
        .await?;

    Ok(file_response(file, "private, no-store")
        .await?
        .respond_to(&req)
        .map_into_boxed_body())
}
