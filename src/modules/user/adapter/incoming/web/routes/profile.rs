use actix_web::{get, put, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::auth::application::domain::entities::PublicUser;
use crate::modules::user::application::domain::ProfileEdit;
use crate::shared::api::{ApiResponse, AppError};
use crate::shared::http::nullable::nullable;
use crate::AppState;

/// Partial profile update. Omitted fields stay as they are; `null` clears
/// the nullable ones.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, example = "+380501234567")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, example = "FEMALE")]
    pub sex: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, example = "1995-04-12")]
    pub birth_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub experience: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>, example = 64.5)]
    pub weight: Option<Option<f64>>,
}

impl From<UpdateProfileRequest> for ProfileEdit {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileEdit {
            name: req.name,
            surname: req.surname,
            phone_number: req.phone_number,
            sex: req.sex,
            birth_date: req.birth_date,
            experience: req.experience,
            weight: req.weight,
        }
    }
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/user/profile",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile", body = inline(SuccessResponse<PublicUser>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
    )
)]
#[get("/api/user/profile")]
pub async fn get_profile_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = data.user.get_profile.execute(user.user_id).await?;
    Ok(ApiResponse::success(profile))
}

/// Update the current user's profile
#[utoipa::path(
    put,
    path = "/api/user/profile",
    tag = "user",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = inline(SuccessResponse<PublicUser>)),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    )
)]
#[put("/api/user/profile")]
pub async fn update_profile_handler(
    user: AuthenticatedUser,
    body: web::Json<UpdateProfileRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = data
        .user
        .update_profile
        .execute(user.user_id, body.into_inner().into())
        .await?;
    Ok(ApiResponse::success(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::{sample_user, Role};
    use crate::modules::user::application::services::UserProfileService;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_fakes::{bearer, test_token_provider, InMemoryUsers};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use uuid::Uuid;

    macro_rules! app {
        ($users:expr) => {{
            let service = Arc::new(UserProfileService::new($users));
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_token_provider()))
                    .app_data(
                        TestAppStateBuilder::default()
                            .user(|uc| {
                                uc.get_profile = service.clone();
                                uc.update_profile = service.clone();
                            })
                            .build(),
                    )
                    .service(get_profile_handler)
                    .service(update_profile_handler),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_get_own_profile() {
        let user = sample_user(Role::User);
        let id = user.id;
        let app = app!(Arc::new(InMemoryUsers::with(vec![user])));

        let req = test::TestRequest::get()
            .uri("/api/user/profile")
            .insert_header(bearer(id, Role::User))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["email"], "olena@example.com");
    }

    #[actix_web::test]
    async fn test_deleted_account_is_404() {
        let app = app!(Arc::new(InMemoryUsers::default()));

        let req = test::TestRequest::get()
            .uri("/api/user/profile")
            .insert_header(bearer(Uuid::new_v4(), Role::User))
            .to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_update_clears_experience_with_null() {
        let user = sample_user(Role::User);
        let id = user.id;
        let app = app!(Arc::new(InMemoryUsers::with(vec![user])));

        let req = test::TestRequest::put()
            .uri("/api/user/profile")
            .insert_header(bearer(id, Role::User))
            .set_json(json!({ "experience": null, "weight": 61.5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json: Value = test::read_body_json(resp).await;
        assert!(json["data"]["experience"].is_null());
        assert_eq!(json["data"]["weight"], 61.5);
    }

    #[actix_web::test]
    async fn test_update_reports_field_errors() {
        let user = sample_user(Role::User);
        let id = user.id;
        let app = app!(Arc::new(InMemoryUsers::with(vec![user])));

        let req = test::TestRequest::put()
            .uri("/api/user/profile")
            .insert_header(bearer(id, Role::User))
            .set_json(json!({ "name": "  ", "birthDate": "17.05.1994" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: Value = test::read_body_json(resp).await;
        assert!(json["error"]["details"]["name"].is_array());
        assert!(json["error"]["details"]["birthDate"].is_array());
    }
}
