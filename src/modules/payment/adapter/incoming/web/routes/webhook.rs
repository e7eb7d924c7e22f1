use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{error, info};

use crate::api::schemas::ErrorResponse;
use crate::shared::api::AppError;
use crate::AppState;

pub const SIGNATURE_HEADER: &str = "X-Sign";

/// Acquirer status callback
///
/// The raw body must carry a valid `X-Sign` signature. Once verified the delivery is always
/// acknowledged with 200 so the acquirer does not retry; the body reports the result.
#[utoipa::path(
    post,
    path = "/api/payments/webhook",
    tag = "payments",
    request_body(content = String, content_type = "application/octet-stream"),
    params(("X-Sign" = String, Header, description = "Base64 ECDSA signature of the body")),
    responses(
        (status = 200, description = "Delivery processed; `status` is success or error"),
        (status = 400, description = "Missing signature or unparsable body", body = ErrorResponse),
        (status = 401, description = "Invalid signature", body = ErrorResponse),
    )
)]
#[post("/api/payments/webhook")]
pub async fn payment_webhook_handler(
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let update = data.payment.verify_webhook.execute(&body, signature).await?;
    let invoice_id = update.invoice_id.clone();

    match data.payment.apply_update.execute(update).await {
        Ok(outcome) => {
            info!(invoice_id = %invoice_id, result = outcome.label(), "webhook processed");
            Ok(HttpResponse::Ok().json(json!({
                "status": "success",
                "invoiceId": invoice_id,
                "result": outcome.label(),
            })))
        }
        Err(e) => {
            error!(invoice_id = %invoice_id, error = %e, "webhook processing failed");
            Ok(HttpResponse::Ok().json(json!({
                "status": "error",
                "invoiceId": invoice_id,
                "message": e.to_string(),
            })))
        }
    }
}
