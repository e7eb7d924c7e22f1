use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::purchase::application::domain::{PaymentReference, Purchase};
use crate::modules::purchase::application::ports::incoming::use_cases::PurchaseRequest;
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseCoursesRequest {
    #[schema(example = json!([1, 2]))]
    pub course_ids: Vec<i32>,
    #[schema(example = "card")]
    pub payment_method: Option<String>,
    pub payment_id: Option<String>,
}

/// Buy courses directly
///
/// Creates a purchase per course and opens the first module and lesson of each.
#[utoipa::path(
    post,
    path = "/api/purchase",
    tag = "purchase",
    security(("bearer_auth" = [])),
    request_body = PurchaseCoursesRequest,
    responses(
        (status = 201, description = "Purchases created", body = inline(SuccessResponse<Vec<Purchase>>)),
        (status = 400, description = "Empty list, already purchased or course without modules", body = ErrorResponse),
        (status = 404, description = "Unknown course ids", body = ErrorResponse),
    )
)]
#[post("/api/purchase")]
pub async fn purchase_courses_handler(
    user: AuthenticatedUser,
    req: web::Json<PurchaseCoursesRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let request = PurchaseRequest {
        course_ids: req.course_ids,
        reference: PaymentReference {
            method: req.payment_method,
            payment_id: req.payment_id,
        },
    };

    let purchases = data.purchase.purchase.execute(user.user_id, request).await?;
    Ok(ApiResponse::created(purchases))
}
