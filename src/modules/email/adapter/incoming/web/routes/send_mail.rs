use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::email::application::domain::MailDraft;
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SendMailRequest {
    #[schema(example = "student@example.com")]
    pub to: Option<String>,
    #[schema(example = "New module released")]
    pub subject: Option<String>,
    pub text: Option<String>,
    pub html: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SendMailResponse {
    pub message: String,
}

/// Send an email (admin only)
///
/// `to` and `subject` are required together with at least one of `text` or `html`.
#[utoipa::path(
    post,
    path = "/api/mail/send",
    tag = "mail",
    security(("bearer_auth" = [])),
    request_body = SendMailRequest,
    responses(
        (status = 200, description = "Mail sent", body = inline(SuccessResponse<SendMailResponse>)),
        (status = 400, description = "Missing recipient, subject or body", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 503, description = "Mail transport unavailable", body = ErrorResponse),
    )
)]
#[post("/api/mail/send")]
pub async fn send_mail_handler(
    admin: AdminUser,
    req: web::Json<SendMailRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    data.mail
        .send
        .execute(MailDraft {
            to: req.to,
            subject: req.subject,
            text: req.text,
            html: req.html,
        })
        .await?;

    info!(admin_id = %admin.user_id, "admin mail sent");
    Ok(ApiResponse::success(SendMailResponse {
        message: "Email sent successfully".to_string(),
    }))
}
