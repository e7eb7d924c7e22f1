use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::cdn::application::domain::MAX_UPLOAD_BYTES;
use crate::modules::cdn::application::ports::incoming::use_cases::UploadMediaCommand;
use crate::shared::api::{ApiResponse, AppError};
use crate::shared::http::multipart::read_multipart;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMediaResponse {
    #[schema(example = "image")]
    pub file_type: String,
    #[schema(example = "0f8e4c1a-7d7e-4a43-9d55-3f0b1c2d4e5f.png")]
    pub file_name: String,
    #[schema(example = "/api/cdn/images/0f8e4c1a-7d7e-4a43-9d55-3f0b1c2d4e5f.png")]
    pub file_url: String,
    #[schema(example = "cover.png")]
    pub original_name: String,
}

/// Upload an image or a course video
///
/// Multipart form with a `file` part and, for videos, a `courseId` field.
#[utoipa::path(
    post,
    path = "/api/cdn/upload",
    tag = "cdn",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "File stored", body = inline(SuccessResponse<UploadedMediaResponse>)),
        (status = 400, description = "Missing file, bad type or missing courseId", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
    )
)]
#[post("/api/cdn/upload")]
pub async fn upload_media_handler(
    admin: AdminUser,
    payload: Multipart,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let mut form = read_multipart(payload, MAX_UPLOAD_BYTES).await?;

    let file = form
        .take_file("file")
        .ok_or_else(|| AppError::validation("file", "No file uploaded"))?;
    let course_id = form
        .text("courseId")
        .map(|v| {
            v.trim()
                .parse::<i32>()
                .map_err(|_| AppError::validation("courseId", "courseId must be an integer"))
        })
        .transpose()?;

    let media = data
        .cdn
        .upload
        .execute(UploadMediaCommand { file, course_id })
        .await?;

    info!(admin_id = %admin.user_id, url = %media.file_url, "Admin uploaded media");

    Ok(ApiResponse::created(UploadedMediaResponse {
        file_type: media.kind.as_str().to_string(),
        file_name: media.file_name,
        file_url: media.file_url,
        original_name: media.original_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::Role;
    use crate::modules::cdn::application::domain::MediaKind;
    use crate::modules::cdn::application::ports::incoming::use_cases::{
        UploadMediaError, UploadMediaUseCase, UploadedMedia,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_fakes::{bearer, test_token_provider};
    use crate::tests::support::multipart::multipart_body;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;
    use uuid::Uuid;

    struct EchoUpload;

    #[async_trait]
    impl UploadMediaUseCase for EchoUpload {
        async fn execute(
            &self,
            command: UploadMediaCommand,
        ) -> Result<UploadedMedia, UploadMediaError> {
            match command.course_id {
                Some(id) => Ok(UploadedMedia {
                    kind: MediaKind::Video,
                    file_name: "v.mp4".into(),
                    file_url: format!("/api/cdn/videos/{id}/v.mp4"),
                    original_name: command.file.original_name,
                }),
                None => Err(UploadMediaError::MissingCourseId),
            }
        }
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_token_provider()))
                    .app_data(
                        TestAppStateBuilder::default()
                            .cdn(|uc| uc.upload = Arc::new(EchoUpload))
                            .build(),
                    )
                    .service(upload_media_handler),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_admin_uploads_video() {
        let app = app!();
        let (content_type, body) = multipart_body(
            &[("courseId", "5")],
            &[("file", "lesson.mp4", "video/mp4", b"frames")],
        );

        let req = test::TestRequest::post()
            .uri("/api/cdn/upload")
            .insert_header(bearer(Uuid::new_v4(), Role::Admin))
            .insert_header(content_type)
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["fileType"], "video");
        assert_eq!(json["data"]["fileUrl"], "/api/cdn/videos/5/v.mp4");
        assert_eq!(json["data"]["originalName"], "lesson.mp4");
    }

    #[actix_web::test]
    async fn test_regular_user_is_forbidden() {
        let app = app!();
        let (content_type, body) =
            multipart_body(&[], &[("file", "a.png", "image/png", b"png")]);

        let req = test::TestRequest::post()
            .uri("/api/cdn/upload")
            .insert_header(bearer(Uuid::new_v4(), Role::User))
            .insert_header(content_type)
            .set_payload(body)
            .to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn test_missing_file_is_400() {
        let app = app!();
        let (content_type, body) = multipart_body(&[("courseId", "5")], &[]);

        let req = test::TestRequest::post()
            .uri("/api/cdn/upload")
            .insert_header(bearer(Uuid::new_v4(), Role::Admin))
            .insert_header(content_type)
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: Value = test::read_body_json(resp).await;
        assert!(json["error"]["details"]["file"].is_array());
    }
}
