use actix_web::{get, web, HttpResponse};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::course::application::domain::{
    PurchasedCourse, UserCourseView, UserLessonView, UserModuleView,
};
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

/// Courses bought by the caller, with overall progress
#[utoipa::path(
    get,
    path = "/api/courses/user/purchased",
    tag = "courses",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Purchased courses", body = inline(SuccessResponse<Vec<PurchasedCourse>>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/api/courses/user/purchased")]
pub async fn list_purchased_courses_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let courses = data.course.purchased.execute(user.user_id).await?;
    Ok(ApiResponse::success(courses))
}

/// Full course tree with the caller's progress
#[utoipa::path(
    get,
    path = "/api/courses/user/{id}",
    tag = "courses",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course with modules, lessons and progress", body = inline(SuccessResponse<UserCourseView>)),
        (status = 403, description = "Course not purchased", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
    )
)]
#[get("/api/courses/user/{id}")]
pub async fn get_user_course_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = data
        .course
        .user_course
        .execute(user.user_id, path.into_inner())
        .await?;
    Ok(ApiResponse::success(view))
}

#[utoipa::path(
    get,
    path = "/api/courses/user/module/{id}",
    tag = "courses",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Module id")),
    responses(
        (status = 200, description = "Module with lessons and progress", body = inline(SuccessResponse<UserModuleView>)),
        (status = 403, description = "Course not purchased", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
    )
)]
#[get("/api/courses/user/module/{id}")]
pub async fn get_user_module_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = data
        .course
        .user_module
        .execute(user.user_id, path.into_inner())
        .await?;
    Ok(ApiResponse::success(view))
}

#[utoipa::path(
    get,
    path = "/api/courses/user/lesson/{id}",
    tag = "courses",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "Lesson with progress and neighbours", body = inline(SuccessResponse<UserLessonView>)),
        (status = 403, description = "Course not purchased", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
    )
)]
#[get("/api/courses/user/lesson/{id}")]
pub async fn get_user_lesson_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = data
        .course
        .user_lesson
        .execute(user.user_id, path.into_inner())
        .await?;
    Ok(ApiResponse::success(view))
}
