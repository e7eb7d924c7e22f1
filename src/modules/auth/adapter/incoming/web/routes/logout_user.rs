use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::schemas::SuccessResponse;
use crate::modules::auth::adapter::incoming::web::cookie::{
    clear_refresh_cookie, read_refresh_cookie,
};
use crate::shared::api::{ApiResponse, AppError};
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

/// Logout
///
/// Revokes the refresh token from the cookie, if any, and clears the cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = inline(SuccessResponse<MessageResponse>)),
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_user_handler(
    req: HttpRequest,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = read_refresh_cookie(&req);
    data.auth.logout.execute(token.as_deref()).await?;

    let mut resp = ApiResponse::success(MessageResponse {
        message: "Logged out successfully".to_string(),
    });
    clear_refresh_cookie(&mut resp)?;
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::ports::incoming::use_cases::{
        LogoutError, LogoutUserUseCase,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{cookie::Cookie, http::StatusCode, test, App};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingLogout {
        seen: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl LogoutUserUseCase for RecordingLogout {
        async fn execute(&self, refresh_token: Option<&str>) -> Result<(), LogoutError> {
            self.seen
                .lock()
                .unwrap()
                .push(refresh_token.map(str::to_string));
            Ok(())
        }
    }

    #[actix_web::test]
    async fn test_logout_clears_cookie_and_revokes() {
        let recorder = Arc::new(RecordingLogout::default());
        let state = TestAppStateBuilder::default()
            .auth(|uc| uc.logout = recorder.clone())
            .build();
        let app = test::init_service(App::new().app_data(state).service(logout_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(Cookie::new("refreshToken", "tok"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let cleared = resp
            .response()
            .cookies()
            .find(|c| c.name() == "refreshToken")
            .unwrap();
        assert_eq!(cleared.value(), "");
        assert_eq!(
            recorder.seen.lock().unwrap().as_slice(),
            &[Some("tok".to_string())]
        );
    }

    #[actix_web::test]
    async fn test_logout_without_cookie_still_succeeds() {
        let state = TestAppStateBuilder::default()
            .auth(|uc| uc.logout = Arc::new(RecordingLogout::default()))
            .build();
        let app = test::init_service(App::new().app_data(state).service(logout_user_handler)).await;

        let req = test::TestRequest::post().uri("/api/auth/logout").to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
