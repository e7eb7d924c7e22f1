use actix_web::{get, web, HttpResponse};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::auth::application::domain::entities::PublicUser;
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/api/user/list",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = inline(SuccessResponse<Vec<PublicUser>>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
    )
)]
#[get("/api/user/list")]
pub async fn list_users_handler(
    _admin: AdminUser,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = data.user.list.execute().await?;
    Ok(ApiResponse::success(users))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::{sample_user, Role};
    use crate::modules::user::application::services::UserProfileService;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_fakes::{bearer, test_token_provider, InMemoryUsers};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use std::sync::Arc;
    use uuid::Uuid;

    macro_rules! app {
        () => {{
            let users = Arc::new(InMemoryUsers::with(vec![sample_user(Role::User)]));
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_token_provider()))
                    .app_data(
                        TestAppStateBuilder::default()
                            .user(|uc| uc.list = Arc::new(UserProfileService::new(users)))
                            .build(),
                    )
                    .service(list_users_handler),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_admin_sees_users() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/user/list")
            .insert_header(bearer(Uuid::new_v4(), Role::Admin))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
        assert!(json["data"][0].get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn test_user_role_is_forbidden() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/user/list")
            .insert_header(bearer(Uuid::new_v4(), Role::User))
            .to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn test_anonymous_is_unauthorized() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/user/list").to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
