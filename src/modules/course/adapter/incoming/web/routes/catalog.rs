use actix_web::{get, web, HttpResponse};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::course::application::domain::{Course, CourseDetail};
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

/// List all courses
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "courses",
    responses(
        (status = 200, description = "Courses ordered by id", body = inline(SuccessResponse<Vec<Course>>)),
    )
)]
#[get("/api/courses")]
pub async fn list_courses_handler(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let courses = data.course.list.execute().await?;
    Ok(ApiResponse::success(courses))
}

/// Public course page
///
/// Modules carry only a lesson count. Lesson content needs a purchase.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course with modules, equipment, benefits and reviews", body = inline(SuccessResponse<CourseDetail>)),
        (status = 404, description = "Course not found", body = ErrorResponse),
    )
)]
#[get("/api/courses/{id}")]
pub async fn get_course_handler(
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let course = data.course.get.execute(path.into_inner()).await?;
    Ok(ApiResponse::success(course))
}
