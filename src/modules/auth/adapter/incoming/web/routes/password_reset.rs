use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::ports::incoming::use_cases::{
    RequestPasswordResetCommand, ResetPasswordCommand,
};
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

use super::logout_user::MessageResponse;

pub const RESET_REQUESTED_MESSAGE: &str =
    "If an account with that email exists, a password reset link has been sent";

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestPasswordResetDto {
    #[schema(example = "olena@example.com")]
    pub email: String,
    /// Front-end origin used to build the link in the email.
    #[schema(example = "https://app.example.com")]
    pub client_url: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct VerifyResetTokenDto {
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResetTokenResponse {
    #[schema(example = true)]
    pub valid: bool,
    #[schema(example = "olena@example.com")]
    pub email: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ResetPasswordDto {
    pub token: String,
    #[schema(example = "NewSecret1")]
    pub password: String,
    #[schema(example = "NewSecret1")]
    pub confirm_password: String,
}

/// Request a password reset email
///
/// Answers with the same message whether or not the email is registered.
#[utoipa::path(
    post,
    path = "/api/auth/password-reset/request",
    tag = "auth",
    request_body = RequestPasswordResetDto,
    responses(
        (status = 200, description = "Request accepted", body = inline(SuccessResponse<MessageResponse>)),
        (status = 400, description = "Invalid email", body = ErrorResponse),
        (status = 503, description = "Email could not be sent", body = ErrorResponse),
    )
)]
#[post("/api/auth/password-reset/request")]
pub async fn request_password_reset_handler(
    req: web::Json<RequestPasswordResetDto>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let dto = req.into_inner();
    let command = RequestPasswordResetCommand::new(dto.email, dto.client_url)?;

    info!(email = %command.email(), "Password reset requested");
    data.auth.request_password_reset.execute(command).await?;

    Ok(ApiResponse::success(MessageResponse {
        message: RESET_REQUESTED_MESSAGE.to_string(),
    }))
}

/// Check a reset token before showing the new password form
#[utoipa::path(
    post,
    path = "/api/auth/password-reset/verify",
    tag = "auth",
    request_body = VerifyResetTokenDto,
    responses(
        (status = 200, description = "Token is valid", body = inline(SuccessResponse<VerifyResetTokenResponse>)),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse),
    )
)]
#[post("/api/auth/password-reset/verify")]
pub async fn verify_reset_token_handler(
    req: web::Json<VerifyResetTokenDto>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let status = data.auth.verify_reset_token.execute(req.token.trim()).await?;

    Ok(ApiResponse::success(VerifyResetTokenResponse {
        valid: true,
        email: status.email,
    }))
}

/// Set a new password with a reset token
///
/// Signs the user out everywhere by revoking all refresh tokens.
#[utoipa::path(
    post,
    path = "/api/auth/password-reset/reset",
    tag = "auth",
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password changed", body = inline(SuccessResponse<MessageResponse>)),
        (status = 400, description = "Validation failed or invalid token", body = ErrorResponse),
    )
)]
#[post("/api/auth/password-reset/reset")]
pub async fn reset_password_handler(
    req: web::Json<ResetPasswordDto>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let dto = req.into_inner();
    let command = ResetPasswordCommand::new(dto.token, dto.password, dto.confirm_password)?;

    data.auth.reset_password.execute(command).await?;

    Ok(ApiResponse::success(MessageResponse {
        message: "Password has been reset successfully".to_string(),
    }))
}
