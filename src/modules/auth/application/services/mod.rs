pub mod cleanup_tokens_service;
pub mod login_user_service;
pub mod logout_user_service;
pub mod password_reset_service;
pub mod refresh_token_service;
pub mod register_user_service;
pub mod session_issuer;
pub mod token_hasher;

pub use cleanup_tokens_service::{spawn_token_cleanup, CleanupExpiredTokensService};
pub use login_user_service::LoginUserService;
pub use logout_user_service::LogoutUserService;
pub use password_reset_service::PasswordResetService;
pub use refresh_token_service::RefreshTokenService;
pub use register_user_service::RegisterUserService;
pub use session_issuer::SessionIssuer;
