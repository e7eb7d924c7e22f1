use std::sync::Arc;

use crate::modules::auth::application::ports::incoming::use_cases::{
    LoginUserUseCase, LogoutUserUseCase, RefreshTokenUseCase, RegisterUserUseCase,
    RequestPasswordResetUseCase, ResetPasswordUseCase, VerifyResetTokenUseCase,
};

#[derive(Clone)]
pub struct AuthUseCases {
    pub register: Arc<dyn RegisterUserUseCase + Send + Sync>,
    pub login: Arc<dyn LoginUserUseCase + Send + Sync>,
    pub refresh: Arc<dyn RefreshTokenUseCase + Send + Sync>,
    pub logout: Arc<dyn LogoutUserUseCase + Send + Sync>,
    pub request_password_reset: Arc<dyn RequestPasswordResetUseCase + Send + Sync>,
    pub verify_reset_token: Arc<dyn VerifyResetTokenUseCase + Send + Sync>,
    pub reset_password: Arc<dyn ResetPasswordUseCase + Send + Sync>,
}
