use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::modules::auth::adapter::incoming::web::routes::{
    AuthResponse, LoginRequestDto, MessageResponse, RefreshTokenRequestDto,
    RegisterUserRequest, RequestPasswordResetDto, ResetPasswordDto, VerifyResetTokenDto,
    VerifyResetTokenResponse,
};
use crate::modules::cdn::adapter::incoming::web::routes::UploadedMediaResponse;
use crate::modules::email::adapter::incoming::web::routes::{SendMailRequest, SendMailResponse};
use crate::modules::payment::adapter::incoming::web::routes::CreatePaymentRequest;
use crate::modules::progress::adapter::incoming::web::routes::UpdatePositionRequest;
use crate::modules::purchase::adapter::incoming::web::routes::PurchaseCoursesRequest;
use crate::modules::user::adapter::incoming::web::routes::UpdateProfileRequest;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Platform API",
        version = "1.0.0",
        description = "Courses, purchases, Monobank payments, learner progress and reviews",
    ),
    paths(
        // Auth
        crate::modules::auth::adapter::incoming::web::routes::register_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::login_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::refresh_token_handler,
        crate::modules::auth::adapter::incoming::web::routes::logout_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::request_password_reset_handler,
        crate::modules::auth::adapter::incoming::web::routes::verify_reset_token_handler,
        crate::modules::auth::adapter::incoming::web::routes::reset_password_handler,

        // Users
        crate::modules::user::adapter::incoming::web::routes::list_users_handler,
        crate::modules::user::adapter::incoming::web::routes::get_profile_handler,
        crate::modules::user::adapter::incoming::web::routes::update_profile_handler,
        crate::modules::user::adapter::incoming::web::routes::upload_profile_image_handler,

        // Courses
        crate::modules::course::adapter::incoming::web::routes::list_courses_handler,
        crate::modules::course::adapter::incoming::web::routes::get_course_handler,
        crate::modules::course::adapter::incoming::web::routes::list_purchased_courses_handler,
        crate::modules::course::adapter::incoming::web::routes::get_user_course_handler,
        crate::modules::course::adapter::incoming::web::routes::get_user_module_handler,
        crate::modules::course::adapter::incoming::web::routes::get_user_lesson_handler,

        // Purchases and payments
        crate::modules::purchase::adapter::incoming::web::routes::purchase_courses_handler,
        crate::modules::payment::adapter::incoming::web::routes::create_payment_handler,
        crate::modules::payment::adapter::incoming::web::routes::payment_status_handler,
        crate::modules::payment::adapter::incoming::web::routes::payment_webhook_handler,

        // Progress
        crate::modules::progress::adapter::incoming::web::routes::update_lesson_position_handler,
        crate::modules::progress::adapter::incoming::web::routes::complete_lesson_handler,
        crate::modules::progress::adapter::incoming::web::routes::complete_module_handler,

        // Reviews
        crate::modules::review::adapter::incoming::web::routes::list_general_reviews_handler,
        crate::modules::review::adapter::incoming::web::routes::get_general_review_handler,
        crate::modules::review::adapter::incoming::web::routes::create_general_review_handler,
        crate::modules::review::adapter::incoming::web::routes::update_general_review_handler,
        crate::modules::review::adapter::incoming::web::routes::delete_general_review_handler,
        crate::modules::review::adapter::incoming::web::routes::list_course_reviews_handler,
        crate::modules::review::adapter::incoming::web::routes::list_reviews_of_course_handler,
        crate::modules::review::adapter::incoming::web::routes::get_course_review_handler,
        crate::modules::review::adapter::incoming::web::routes::create_course_review_handler,
        crate::modules::review::adapter::incoming::web::routes::update_course_review_handler,
        crate::modules::review::adapter::incoming::web::routes::delete_course_review_handler,

        // Files
        crate::modules::cdn::adapter::incoming::web::routes::upload_media_handler,
        crate::modules::cdn::adapter::incoming::web::routes::serve_public_file_handler,
        crate::modules::cdn::adapter::incoming::web::routes::serve_course_video_handler,

        // Mail
        crate::modules::email::adapter::incoming::web::routes::send_mail_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,

            RegisterUserRequest,
            LoginRequestDto,
            RefreshTokenRequestDto,
            AuthResponse,
            MessageResponse,
            RequestPasswordResetDto,
            VerifyResetTokenDto,
            VerifyResetTokenResponse,
            ResetPasswordDto,
            UpdateProfileRequest,
            PurchaseCoursesRequest,
            CreatePaymentRequest,
            UpdatePositionRequest,
            UploadedMediaResponse,
            SendMailRequest,
            SendMailResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, sessions and password reset"),
        (name = "user", description = "Profiles"),
        (name = "courses", description = "Catalog and learner course views"),
        (name = "purchase", description = "Direct course grants"),
        (name = "payments", description = "Monobank checkout and webhook"),
        (name = "progress", description = "Lesson and module progress"),
        (name = "reviews", description = "General and course reviews"),
        (name = "cdn", description = "File upload and delivery"),
        (name = "mail", description = "Outgoing mail"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from login or register"))
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_paths_and_bearer_scheme() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/payments/create"));
        assert!(doc.paths.paths.contains_key("/api/auth/login"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_error_schema_documents_validation_details() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        let detail = &doc["components"]["schemas"]["ErrorDetail"];
        assert!(detail["properties"]["details"].is_object());
        let required = detail["required"].as_array().unwrap();
        assert!(!required.iter().any(|f| f == "details"));
    }
}
