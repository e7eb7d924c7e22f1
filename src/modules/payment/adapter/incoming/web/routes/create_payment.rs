use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::payment::application::ports::incoming::use_cases::CheckoutSession;
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePaymentRequest {
    #[schema(example = json!([1, 2]))]
    pub course_ids: Vec<i32>,
}

/// Start a card checkout
///
/// Creates an acquirer invoice for the courses and returns the page the buyer pays on.
#[utoipa::path(
    post,
    path = "/api/payments/create",
    tag = "payments",
    security(("bearer_auth" = [])),
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Invoice created", body = inline(SuccessResponse<CheckoutSession>)),
        (status = 400, description = "Empty list, already purchased or course without modules", body = ErrorResponse),
        (status = 404, description = "Unknown course ids", body = ErrorResponse),
        (status = 502, description = "Payment provider error", body = ErrorResponse),
    )
)]
#[post("/api/payments/create")]
pub async fn create_payment_handler(
    user: AuthenticatedUser,
    req: web::Json<CreatePaymentRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = data
        .payment
        .create
        .execute(user.user_id, req.into_inner().course_ids)
        .await?;
    Ok(ApiResponse::created(session))
}
