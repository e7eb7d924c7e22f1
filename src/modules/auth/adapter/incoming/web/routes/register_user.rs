use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::cookie::attach_refresh_cookie;
use crate::modules::auth::application::domain::entities::PublicUser;
use crate::modules::auth::application::ports::incoming::use_cases::{
    AuthSession, RegisterUserCommand, RegisterUserInput,
};
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterUserRequest {
    #[schema(example = "olena@example.com")]
    pub email: String,
    #[schema(example = "Secret123")]
    pub password: String,
    #[schema(example = "Olena")]
    pub name: String,
    #[schema(example = "Kovalenko")]
    pub surname: String,
    #[schema(example = "+380501234567")]
    pub phone_number: Option<String>,
    #[schema(example = "FEMALE")]
    pub sex: String,
    #[schema(example = "1994-05-17")]
    pub birth_date: String,
    #[schema(example = "beginner")]
    pub experience: String,
}

/// Body returned by register, login and refresh. The refresh token travels in a cookie.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: PublicUser,
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
}

/// Build the JSON body and set the refresh cookie.
pub(crate) fn session_response(
    session: AuthSession,
    created: bool,
) -> Result<HttpResponse, AppError> {
    let body = AuthResponse {
        user: session.user,
        access_token: session.access_token,
    };
    let mut resp = if created {
        ApiResponse::created(body)
    } else {
        ApiResponse::success(body)
    };
    attach_refresh_cookie(&mut resp, &session.refresh_token, session.refresh_expires_in)?;
    Ok(resp)
}

/// Register a new account
///
/// Creates a USER account, signs the caller in and sets the `refreshToken` cookie.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<AuthResponse>)),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let dto = req.into_inner();

    let command = RegisterUserCommand::new(RegisterUserInput {
        email: dto.email,
        password: dto.password,
        name: dto.name,
        surname: dto.surname,
        phone_number: dto.phone_number,
        sex: dto.sex,
        birth_date: dto.birth_date,
        experience: dto.experience,
    })?;

    info!(email = %command.email(), "Registration attempt");
    let session = data.auth.register.execute(command).await?;

    session_response(session, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::{sample_user, Role};
    use crate::modules::auth::application::ports::incoming::use_cases::{
        RegisterUserError, RegisterUserUseCase,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct MockRegisterSuccess;

    #[async_trait]
    impl RegisterUserUseCase for MockRegisterSuccess {
        async fn execute(
            &self,
            command: RegisterUserCommand,
        ) -> Result<AuthSession, RegisterUserError> {
            let mut user = sample_user(Role::User);
            user.email = command.email().to_string();
            Ok(AuthSession {
                user: user.into(),
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
                refresh_expires_in: 604800,
            })
        }
    }

    struct MockRegisterDuplicate;

    #[async_trait]
    impl RegisterUserUseCase for MockRegisterDuplicate {
        async fn execute(&self, _: RegisterUserCommand) -> Result<AuthSession, RegisterUserError> {
            Err(RegisterUserError::EmailAlreadyExists)
        }
    }

    fn body() -> Value {
        json!({
            "email": "New@Example.com",
            "password": "Secret123",
            "name": "Olena",
            "surname": "Kovalenko",
            "sex": "FEMALE",
            "birthDate": "1994-05-17",
            "experience": "beginner"
        })
    }

    #[actix_web::test]
    async fn test_register_sets_cookie_and_returns_201() {
        let state = TestAppStateBuilder::default()
            .auth(|uc| uc.register = Arc::new(MockRegisterSuccess))
            .build();
        let app = test::init_service(App::new().app_data(state).service(register_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(body())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "refreshToken")
            .expect("refresh cookie");
        assert_eq!(cookie.value(), "refresh");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/api/auth"));

        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["user"]["email"], "new@example.com");
        assert_eq!(json["data"]["accessToken"], "access");
        assert!(json["data"]["user"].get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn test_register_validation_lists_fields() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(register_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "bad", "password": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(json["error"]["details"]["email"].is_array());
        assert!(json["error"]["details"]["password"].is_array());
    }

    #[actix_web::test]
    async fn test_register_duplicate_email_is_409() {
        let state = TestAppStateBuilder::default()
            .auth(|uc| uc.register = Arc::new(MockRegisterDuplicate))
            .build();
        let app = test::init_service(App::new().app_data(state).service(register_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(body())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["error"]["code"], "EMAIL_ALREADY_EXISTS");
    }
}
