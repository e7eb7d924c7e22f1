use actix_web::{patch, web, HttpResponse};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::progress::application::domain::{CompleteLessonResult, CompleteModuleResult};
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

/// Mark a lesson completed
///
/// Unlocks the next lesson and, when the module is finished, the next module.
#[utoipa::path(
    patch,
    path = "/api/progress/lessons/{lesson_id}/complete",
    tag = "progress",
    security(("bearer_auth" = [])),
    params(("lesson_id" = i32, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "Cascade result", body = inline(SuccessResponse<CompleteLessonResult>)),
        (status = 403, description = "Course not purchased or lesson locked", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
    )
)]
#[patch("/api/progress/lessons/{lesson_id}/complete")]
pub async fn complete_lesson_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = data
        .progress
        .complete_lesson
        .execute(user.user_id, path.into_inner())
        .await?;
    Ok(ApiResponse::success(result))
}

/// Mark every lesson of a module completed
#[utoipa::path(
    patch,
    path = "/api/progress/modules/{module_id}/complete",
    tag = "progress",
    security(("bearer_auth" = [])),
    params(("module_id" = i32, Path, description = "Module id")),
    responses(
        (status = 200, description = "Cascade result", body = inline(SuccessResponse<CompleteModuleResult>)),
        (status = 400, description = "Module has no lessons", body = ErrorResponse),
        (status = 403, description = "Course not purchased or module locked", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
    )
)]
#[patch("/api/progress/modules/{module_id}/complete")]
pub async fn complete_module_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = data
        .progress
        .complete_module
        .execute(user.user_id, path.into_inner())
        .await?;
    Ok(ApiResponse::success(result))
}
