use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::{AuthenticatedUser, OptionalUser};
use crate::modules::review::application::domain::{Requester, Review, ReviewTarget};
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

use super::form::read_review_form;

/// List general reviews, newest first
#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "reviews",
    responses(
        (status = 200, description = "Reviews with author profiles", body = inline(SuccessResponse<Vec<Review>>)),
    )
)]
#[get("/api/reviews")]
pub async fn list_general_reviews_handler(
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let reviews = data.review.list.execute(ReviewTarget::General).await?;
    Ok(ApiResponse::success(reviews))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    tag = "reviews",
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review", body = inline(SuccessResponse<Review>)),
        (status = 404, description = "Review not found", body = ErrorResponse),
    )
)]
#[get("/api/reviews/{id}")]
pub async fn get_general_review_handler(
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let review = data
        .review
        .get
        .execute(ReviewTarget::General, path.into_inner())
        .await?;
    Ok(ApiResponse::success(review))
}

/// Submit a general review
///
/// Multipart form. Without a bearer token `authorName` and `authorSurname` are required.
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "reviews",
    responses(
        (status = 201, description = "Created review", body = inline(SuccessResponse<Review>)),
        (status = 400, description = "Invalid fields or photo", body = ErrorResponse),
    )
)]
#[post("/api/reviews")]
pub async fn create_general_review_handler(
    user: OptionalUser,
    payload: Multipart,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (form, photos) = read_review_form(payload).await?;
    let author = user.0.map(|u| u.user_id);

    let review = data
        .review
        .create
        .execute(ReviewTarget::General, author, form, photos)
        .await?;
    Ok(ApiResponse::created(review))
}

/// Edit a general review (author or admin)
///
/// Only submitted fields change. `removeBeforePhoto=true` / `removeAfterPhoto=true` clear a photo.
#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Updated review", body = inline(SuccessResponse<Review>)),
        (status = 400, description = "Invalid fields or photo", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse),
    )
)]
#[put("/api/reviews/{id}")]
pub async fn update_general_review_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    payload: Multipart,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (form, photos) = read_review_form(payload).await?;
    let requester = Requester {
        user_id: user.user_id,
        role: user.role,
    };

    let review = data
        .review
        .update
        .execute(ReviewTarget::General, path.into_inner(), requester, form, photos)
        .await?;
    Ok(ApiResponse::success(review))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse),
    )
)]
#[delete("/api/reviews/{id}")]
pub async fn delete_general_review_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let requester = Requester {
        user_id: user.user_id,
        role: user.role,
    };
    data.review
        .delete
        .execute(ReviewTarget::General, path.into_inner(), requester)
        .await?;
    Ok(ApiResponse::no_content())
}
