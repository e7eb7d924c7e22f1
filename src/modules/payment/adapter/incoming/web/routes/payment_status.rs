use actix_web::{get, web, HttpResponse};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::payment::application::domain::Payment;
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

/// Current state of one of the caller's payments
///
/// Pending payments are refreshed from the acquirer before answering.
#[utoipa::path(
    get,
    path = "/api/payments/status/{invoice_id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(("invoice_id" = String, Path, description = "Acquirer invoice id")),
    responses(
        (status = 200, description = "Payment", body = inline(SuccessResponse<Payment>)),
        (status = 404, description = "No such payment for this user", body = ErrorResponse),
    )
)]
#[get("/api/payments/status/{invoice_id}")]
pub async fn payment_status_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let payment = data
        .payment
        .status
        .execute(user.user_id, path.into_inner())
        .await?;
    Ok(ApiResponse::success(payment))
}
