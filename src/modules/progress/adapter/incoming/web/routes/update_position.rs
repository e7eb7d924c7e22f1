use actix_web::{patch, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::progress::application::domain::LessonProgress;
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePositionRequest {
    /// Playback position in seconds; fractions are dropped.
    #[serde(default)]
    #[schema(example = 125.4)]
    pub position: Option<f64>,
}

/// Save the playback position of a lesson
#[utoipa::path(
    patch,
    path = "/api/progress/lessons/{lesson_id}/position",
    tag = "progress",
    security(("bearer_auth" = [])),
    params(("lesson_id" = i32, Path, description = "Lesson id")),
    request_body = UpdatePositionRequest,
    responses(
        (status = 200, description = "Updated lesson progress", body = inline(SuccessResponse<LessonProgress>)),
        (status = 400, description = "Missing or negative position", body = ErrorResponse),
        (status = 403, description = "Course not purchased or lesson locked", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
    )
)]
#[patch("/api/progress/lessons/{lesson_id}/position")]
pub async fn update_lesson_position_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    body: web::Json<UpdatePositionRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let position = body
        .position
        .filter(|p| p.is_finite())
        .ok_or_else(|| AppError::validation("position", "Position is required"))?;

    let progress = data
        .progress
        .update_position
        .execute(user.user_id, path.into_inner(), position.trunc() as i64)
        .await?;

    Ok(ApiResponse::success(progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::Role;
    use crate::modules::progress::application::ports::incoming::use_cases::{
        ProgressError, UpdateLessonPositionUseCase,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_fakes::{bearer, test_token_provider};
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use uuid::Uuid;

    struct Positions;

    #[async_trait]
    impl UpdateLessonPositionUseCase for Positions {
        async fn execute(
            &self,
            _user_id: Uuid,
            lesson_id: i32,
            position: i64,
        ) -> Result<LessonProgress, ProgressError> {
            if lesson_id == 2 {
                return Err(ProgressError::LessonLocked);
            }
            if position < 0 {
                return Err(ProgressError::InvalidPosition);
            }
            let mut row = LessonProgress::unlocked(lesson_id);
            row.position = position as i32;
            Ok(row)
        }
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_token_provider()))
                    .app_data(
                        TestAppStateBuilder::default()
                            .progress(|uc| uc.update_position = Arc::new(Positions))
                            .build(),
                    )
                    .service(update_lesson_position_handler),
            )
            .await
        };
    }

    async fn call(lesson: i32, body: Value) -> (StatusCode, Value) {
        let app = app!();
        let req = test::TestRequest::patch()
            .uri(&format!("/api/progress/lessons/{lesson}/position"))
            .insert_header(bearer(Uuid::new_v4(), Role::User))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_position_is_truncated_and_saved() {
        let (status, json) = call(1, json!({ "position": 61.9 })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["position"], 61);
        assert_eq!(json["data"]["lessonId"], 1);
    }

    #[actix_web::test]
    async fn test_missing_position_is_400() {
        let (status, json) = call(1, json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]["details"]["position"].is_array());
    }

    #[actix_web::test]
    async fn test_negative_position_is_400() {
        let (status, _) = call(1, json!({ "position": -3 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_locked_lesson_is_403() {
        let (status, json) = call(2, json!({ "position": 10 })).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"]["code"], "LESSON_LOCKED");
    }
}
