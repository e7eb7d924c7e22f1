use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::cookie::read_refresh_cookie;
use crate::modules::auth::application::ports::incoming::use_cases::RefreshTokenError;
use crate::shared::api::AppError;
use crate::AppState;

use super::register_user::{session_response, AuthResponse};

/// Optional body for clients that cannot send cookies.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequestDto {
    pub refresh_token: Option<String>,
}

/// Rotate the refresh token
///
/// Reads the `refreshToken` cookie (or `refreshToken` in the body), revokes it and issues
/// a new pair.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    request_body(content = Option<RefreshTokenRequestDto>),
    responses(
        (status = 200, description = "New tokens issued", body = inline(SuccessResponse<AuthResponse>)),
        (status = 401, description = "Missing, invalid or revoked refresh token", body = ErrorResponse),
    )
)]
#[post("/api/auth/refresh")]
pub async fn refresh_token_handler(
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequestDto>>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = read_refresh_cookie(&req)
        .or_else(|| body.and_then(|b| b.into_inner().refresh_token))
        .ok_or(RefreshTokenError::MissingToken)?;

    let session = data.auth.refresh.execute(&token).await?;

    session_response(session, false)
}
