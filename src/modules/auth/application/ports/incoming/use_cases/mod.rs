pub mod auth_session;
pub mod cleanup_tokens;
pub mod login_user;
pub mod logout_user;
pub mod password_reset;
pub mod refresh_token;
pub mod register_user;

pub use auth_session::AuthSession;
pub use cleanup_tokens::{CleanupExpiredTokensUseCase, CleanupReport, CleanupTokensError};
pub use login_user::{LoginCommand, LoginError, LoginUserUseCase};
pub use logout_user::{LogoutError, LogoutUserUseCase};
pub use password_reset::{
    PasswordResetError, RequestPasswordResetCommand, RequestPasswordResetUseCase,
    ResetPasswordCommand, ResetPasswordUseCase, ResetTokenStatus, VerifyResetTokenUseCase,
};
pub use refresh_token::{RefreshTokenError, RefreshTokenUseCase};
pub use register_user::{
    RegisterUserCommand, RegisterUserError, RegisterUserInput, RegisterUserUseCase,
};
