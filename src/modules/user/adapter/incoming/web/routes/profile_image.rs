use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::auth::application::domain::entities::PublicUser;
use crate::modules::cdn::application::domain::MAX_IMAGE_BYTES;
use crate::shared::api::{ApiResponse, AppError};
use crate::shared::http::multipart::read_multipart;
use crate::AppState;

/// Replace the current user's profile image
///
/// Multipart form with an `image` part (jpg, png, gif or webp, up to 5 MB).
#[utoipa::path(
    post,
    path = "/api/user/profile/image",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile with the new image URL", body = inline(SuccessResponse<PublicUser>)),
        (status = 400, description = "Missing, oversized or non-image file", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    )
)]
#[post("/api/user/profile/image")]
pub async fn upload_profile_image_handler(
    user: AuthenticatedUser,
    payload: Multipart,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let mut form = read_multipart(payload, MAX_IMAGE_BYTES).await?;
    let image = form
        .take_file("image")
        .ok_or_else(|| AppError::validation("image", "No image uploaded"))?;

    let profile = data.user.upload_image.execute(user.user_id, image).await?;
    Ok(ApiResponse::success(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::{sample_user, Role};
    use crate::modules::user::application::services::ProfileImageService;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_fakes::{bearer, test_token_provider, InMemoryUsers};
    use crate::tests::support::multipart::multipart_body;
    use crate::tests::support::storage_fakes::InMemoryStorage;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_upload_sets_image_url() {
        let user = sample_user(Role::User);
        let id = user.id;
        let storage = Arc::new(InMemoryStorage::default());
        let service = ProfileImageService::new(
            Arc::new(InMemoryUsers::with(vec![user])),
            storage.clone(),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_token_provider()))
                .app_data(
                    TestAppStateBuilder::default()
                        .user(|uc| uc.upload_image = Arc::new(service))
                        .build(),
                )
                .service(upload_profile_image_handler),
        )
        .await;

        let (content_type, body) =
            multipart_body(&[], &[("image", "me.webp", "image/webp", b"RIFF")]);
        let req = test::TestRequest::post()
            .uri("/api/user/profile/image")
            .insert_header(bearer(id, Role::User))
            .insert_header(content_type)
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json: Value = test::read_body_json(resp).await;
        let url = json["data"]["imageUrl"].as_str().unwrap();
        assert!(url.starts_with("/api/cdn/images/") && url.ends_with(".webp"));
        assert_eq!(storage.keys().len(), 1);
    }

    #[actix_web::test]
    async fn test_missing_image_part_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_token_provider()))
                .app_data(TestAppStateBuilder::default().build())
                .service(upload_profile_image_handler),
        )
        .await;

        let (content_type, body) = multipart_body(&[("note", "hi")], &[]);
        let req = test::TestRequest::post()
            .uri("/api/user/profile/image")
            .insert_header(bearer(uuid::Uuid::new_v4(), Role::User))
            .insert_header(content_type)
            .set_payload(body)
            .to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
