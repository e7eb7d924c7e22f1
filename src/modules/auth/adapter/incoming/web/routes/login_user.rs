use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::ports::incoming::use_cases::LoginCommand;
use crate::shared::api::AppError;
use crate::AppState;

use super::register_user::{session_response, AuthResponse};

/// Login request from client
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "olena@example.com")]
    #[serde(default)]
    pub email: String,

    #[schema(example = "Secret123")]
    #[serde(default)]
    pub password: String,
}

/// User login
///
/// Authenticates with email and password. Returns the access token and sets the refresh cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<AuthResponse>)),
        (
            status = 401,
            description = "Invalid credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "INVALID_CREDENTIALS", "message": "Invalid email or password" }
            })
        ),
    )
)]
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let dto = req.into_inner();
    let command = LoginCommand::new(dto.email, dto.password)?;

    info!(email = %command.email(), "Login attempt");
    let session = data.auth.login.execute(command).await?;

    session_response(session, false)
}
